pub mod forecast_record;
