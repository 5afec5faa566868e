use chrono::TimeZone;
use remindr_domain::{Board, BoardList};
use remindr_infra::{InMemoryBoardClient, RecordingNotifier, RemindrContext, StaticTimeSys};
use std::sync::Arc;

pub const OWNER: &str = "owner-1";
pub const BOARD_OWNER: &str = "board-owner";

pub struct TestContext {
    pub ctx: RemindrContext,
    pub sys: Arc<StaticTimeSys>,
    pub notifier: Arc<RecordingNotifier>,
    pub board: Arc<InMemoryBoardClient>,
}

pub fn paris_millis(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
    chrono_tz::Europe::Paris
        .ymd(y, m, d)
        .and_hms(h, min, 0)
        .timestamp_millis()
}

pub fn board_lists() -> Vec<BoardList> {
    ["Backlog", "To Do", "Done"]
        .iter()
        .enumerate()
        .map(|(i, name)| BoardList {
            id: format!("L{}", i + 1),
            name: name.to_string(),
        })
        .collect()
}

/// In memory context with a fully configured board. The clock is stopped
/// at Monday 2026-10-19 09:00 in Paris.
pub fn setup() -> TestContext {
    let mut ctx = RemindrContext::create_inmemory();
    let sys = Arc::new(StaticTimeSys::new(paris_millis(2026, 10, 19, 9, 0)));
    let notifier = Arc::new(RecordingNotifier::new());
    let board = Arc::new(InMemoryBoardClient::new(
        Board {
            id: "B1".into(),
            name: "Work".into(),
            url: Some("https://trello.com/b/B1".into()),
        },
        board_lists(),
    ));

    ctx.sys = sys.clone();
    ctx.services.notifier = notifier.clone();
    ctx.services.board = Some(board.clone());
    ctx.config.timezone = chrono_tz::Europe::Paris;
    ctx.config.board.board_id = Some("B1".into());
    ctx.config.board.owner_id = Some(BOARD_OWNER.into());
    ctx.config.board.public_url = Some("https://remindr.test".into());

    TestContext {
        ctx,
        sys,
        notifier,
        board,
    }
}
