use std::future::Future;

use colored::*;
use indicatif::ProgressStyle;
use tracing::{Instrument, Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::colors;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS)
}

/// A span rendered as a spinner by the indicatif layer while it is entered.
pub fn span(message: &str) -> Span {
    let span = info_span!("activity", indicatif.pb_show = true);
    span.pb_set_style(&style());
    span.pb_set_message(&format!("{}", message.color(colors::TEXT_DEFAULT)));
    span
}

/// Runs `fut` under a spinner showing `message`. Silent at quiet level 2.
pub async fn run<F, T>(message: &str, q_level: u8, fut: F) -> T
where
    F: Future<Output = T>,
{
    if q_level > 1 {
        return fut.await;
    }
    fut.instrument(span(message)).await
}

pub fn waiting_for(what: &str) -> String {
    format!("Waiting for {}...", what.bold())
}
