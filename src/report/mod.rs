pub mod pdf;

pub use pdf::{encode_safe, render_report, report_filename};
