use log::info;

#[tokio::main]
async fn main() {
    log4rs::init_file("log4rs.yaml", Default::default())
        .expect("Failed to initialise logging");
    info!("Starting stayvote server");

    stayvote::web::setup().await;
}
