//! # Registry Models
//!
//! Plain records mirrored from the backend schema. The backend owns every
//! invariant (uniqueness of CUIT and email, rubro → subrubro and
//! departamento → municipio → localidad integrity); these types only carry data.
//! Unknown fields are ignored and almost everything is optional so that older
//! and newer backend serializers both decode.

pub mod catalogo;
pub mod empresa;
pub mod matriz;
pub mod oferta;
pub mod referencia;
pub mod usuario;

pub use catalogo::{Departamento, Localidad, Municipio, Rubro, SubRubro};
pub use empresa::{Empresa, NuevaEmpresa, TipoEmpresa};
pub use matriz::CategoriaMatriz;
pub use oferta::{ActividadPromocion, Contacto, Producto, Servicio};
pub use referencia::Referencia;
pub use usuario::{EmpresaResumen, Rol, Usuario};
