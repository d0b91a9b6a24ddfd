#[actix_web::main]
async fn main() -> std::io::Result<()> {
    docu_forge_server::run().await
}
