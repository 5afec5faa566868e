use remindr_api::Application;
use remindr_infra::{Config, RecordingNotifier, RemindrContext, Repos, Services, StaticTimeSys};
use remindr_sdk::RemindrSDK;
use std::path::Path;
use std::sync::Arc;

pub const BOARD_OWNER: &str = "board-owner";

pub struct TestApp {
    pub config: Config,
    pub address: String,
}

impl TestApp {
    pub fn sdk(&self, owner_id: &str) -> RemindrSDK {
        RemindrSDK::new(self.address.clone(), owner_id)
    }
}

async fn launch(mut ctx: RemindrContext) -> TestApp {
    ctx.config.port = 0; // Random port
    ctx.config.board.owner_id = Some(BOARD_OWNER.into());

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp { config, address }
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    launch(RemindrContext::create_inmemory()).await
}

/// Launches the application storing its documents in `dir`, with a clock
/// stopped at `now`
pub async fn spawn_app_with_files(dir: &Path, now: i64) -> TestApp {
    let mut config = Config::default();
    config.reminders_file = dir.join("reminders.json");
    config.webhook_ids_file = dir.join("board-webhooks.json");
    let repos = Repos::create_file(&config);
    let services = Services {
        board: None,
        notifier: Arc::new(RecordingNotifier::new()),
    };
    let ctx = RemindrContext::new(config, repos, services, Arc::new(StaticTimeSys::new(now)));
    launch(ctx).await
}
