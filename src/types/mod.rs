pub mod dry_thunderstorm;
pub mod enriched_row;
pub mod filter_params;
pub mod row_query;
pub mod weather_record;
pub mod zone_option;
