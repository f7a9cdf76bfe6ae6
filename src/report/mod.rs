mod csv_report;

pub use csv_report::write_scores_to_path;
