use crate::app::{AppContext, NewsdeskError, Result};
use crate::domain::FeedItem;
use crate::render::{format_card, ListSink, StdoutSink};
use crate::scheduler::interval::format_interval;
use crate::scheduler::Trigger;
use crate::tui::{self, sink::ChannelSink};

pub async fn run_tui(ctx: &AppContext) -> Result<()> {
    let (sink, views) = ChannelSink::new();
    let (scheduler, handle) = ctx.scheduler(sink);
    let task = tokio::spawn(scheduler.run());

    // Returning drops the last handle, which stops the scheduler
    tui::run(handle, views, &ctx.config).await?;

    task.await
        .map_err(|e| NewsdeskError::Other(format!("Scheduler task failed: {}", e)))
}

pub async fn run_watch(ctx: &AppContext) -> Result<()> {
    let (scheduler, _handle) = ctx.scheduler(StdoutSink::new());

    eprintln!(
        "Watching {} feeds every {} (Ctrl+C to stop)",
        ctx.sources.len(),
        format_interval(ctx.config.poll.interval.as_secs())
    );

    tokio::select! {
        _ = scheduler.run() => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("interrupted, shutting down");
        }
    }

    Ok(())
}

pub async fn run_once(ctx: &AppContext, json: bool) -> Result<()> {
    let (mut scheduler, _handle) = ctx.scheduler(ListSink::new());
    let report = scheduler.poll_once(Trigger::Manual).await;
    let aggregator = scheduler.into_aggregator();

    for notice in aggregator.sink().notices() {
        eprintln!("! {}", notice);
    }

    let items: Vec<&FeedItem> = aggregator.buffer().iter().collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for item in &items {
            println!("{}", format_card(item));
        }
        eprintln!(
            "{} headlines from {} feeds ({} failed)",
            items.len(),
            report.feeds.len(),
            report.errors()
        );
    }

    Ok(())
}
