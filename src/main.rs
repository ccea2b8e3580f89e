#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    deploy_smoke_lib::run().await
}
