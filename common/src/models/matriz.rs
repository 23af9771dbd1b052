use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Outcome of the *matriz de clasificación*, the rubric that ranks a company's
/// export maturity. The score itself is computed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoriaMatriz {
    #[serde(rename = "Exportadora", alias = "exportadora", alias = "EXPORTADORA")]
    Exportadora,
    #[serde(
        rename = "Potencial Exportadora",
        alias = "potencial_exportadora",
        alias = "POTENCIAL_EXPORTADORA"
    )]
    PotencialExportadora,
    #[serde(rename = "Etapa Inicial", alias = "etapa_inicial", alias = "ETAPA_INICIAL")]
    EtapaInicial,
}

impl CategoriaMatriz {
    pub fn label(&self) -> &'static str {
        match self {
            CategoriaMatriz::Exportadora => "Exportadora",
            CategoriaMatriz::PotencialExportadora => "Potencial Exportadora",
            CategoriaMatriz::EtapaInicial => "Etapa Inicial",
        }
    }
}

impl fmt::Display for CategoriaMatriz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoriaMatriz {
    type Err = String;

    /// Accepts the display label or its snake_case form, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "exportadora" => Ok(CategoriaMatriz::Exportadora),
            "potencial_exportadora" | "potencial" => Ok(CategoriaMatriz::PotencialExportadora),
            "etapa_inicial" | "inicial" => Ok(CategoriaMatriz::EtapaInicial),
            _ => Err(format!("unknown classification: {s}")),
        }
    }
}
