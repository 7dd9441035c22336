pub mod anki_export;
pub mod config;
pub mod frequencies;
pub mod lexique_filter;
pub mod morphology_analysis;
