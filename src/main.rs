use anyhow::Context;

use site_backend::app::{
    load_configuration,
    setup_tracing,
    SiteApp,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let configuration = load_configuration().context("error loading configuration")?;
    setup_tracing(
        "site-backend".into(),
        configuration.application.log_level.clone(),
        std::io::stdout,
    )?;
    let app = SiteApp::from(configuration).await?;
    tracing::info!(port = app.port, "server listening");
    app.server.await.context("server error")
}
