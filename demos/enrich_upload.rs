// demos/enrich_upload.rs
use forest_weather::{Dashboard, DashboardError, FailurePolicy, FilterParams};

const PLOTS: &[u8] = b"type_name,type_id,lat,lon,dt,lesn1,lesn3\n\
    pine,1,55.75,37.62,2021/06/01,Moscow,North\n\
    birch,2,59.94,30.31,2021/07/15,Leningrad,West\n\
    spruce,3,56.84,60.61,2021/08/03,Sverdlovsk,East\n";

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    // Set RUST_LOG=info to see the per-row lookups
    env_logger::init();

    let dashboard = Dashboard::builder()
        .failure_policy(FailurePolicy::MarkUnavailable)
        .build();
    let session = dashboard.create_session().await;

    println!("Enriching plots with archive weather...");
    let view = dashboard.upload(session, "plots.csv", PLOTS).await?;
    println!("Enriched rows: {}", view.raw_rows);

    let page = dashboard.table_page(session, 0, 5).await?;
    for row in &page.rows {
        println!(
            "#{} {:?} at ({}, {}): code {:?}, {:?} mm, dry thunderstorm: {}",
            row.id,
            row.type_name,
            row.lat,
            row.lon,
            row.weather_code,
            row.precipitation,
            row.dry_thunderstorm
        );
    }

    // Only the first oblast
    let view = dashboard
        .apply_filter(session, FilterParams::builder().zone1("Moscow").build())
        .await?;
    println!("Rows after zone filter: {}", view.filtered_rows);

    let csv = dashboard.export_csv(session).await?;
    println!("{}", String::from_utf8_lossy(&csv));

    Ok(())
}
