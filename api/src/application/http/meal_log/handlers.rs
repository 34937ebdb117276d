pub mod get_daily_summary;
