use chess_cup::app::App;
use chess_cup::args::AppArgs;
use chess_cup::auth::AdminGate;
use chess_cup::session::Session;
use chess_cup::store::{store_path, JsonStore, MatchStore};
use chess_cup::tournament::views::text_report;
use chess_cup::tui::Tui;
use chess_cup::types::AppResult;
use clap::Parser;
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

fn run_headless<S: MatchStore>(mut session: Session<S>, args: &AppArgs) -> AppResult<()> {
    if let (Some(match_id), Some(winner)) = (args.record_match, args.winner.as_deref()) {
        if !session.unlock(args.admin_password()) {
            return Err(anyhow::anyhow!("Wrong admin password."));
        }
        for seeded in session.record_winner(match_id, winner)? {
            println!("Scheduled match {seeded}");
        }
    }

    println!(
        "{}",
        text_report(session.bracket().matches(), &session.standings())
    );
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> AppResult<()> {
    let logfile_path = store_path("chess-cup.log")?;
    let logfile = FileAppender::builder()
        .append(false)
        .encoder(Box::new(PatternEncoder::new("{l} - {m}\n")))
        .build(logfile_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .build(Root::builder().appender("logfile").build(LevelFilter::Info))?;

    log4rs::init_config(config)?;
    let args = AppArgs::parse();

    let store = JsonStore::from_prefix(args.store_prefix())?;
    if args.reset_store {
        store.reset()?;
    }

    let session = Session::load(
        store,
        AdminGate::new(args.admin_password()),
        args.seeding_policy(),
    )?;

    if args.is_ui_disabled() {
        return run_headless(session, &args);
    }

    let tui = Tui::new()?;
    App::new(session).run(tui).await
}
