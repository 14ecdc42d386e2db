use std::{sync::Arc, time::Duration};

use serenity::all::MessageId;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use super::{
    announcer::{Announcer, Controls},
    embed::generate_embed,
    end::end_giveaway,
};
use crate::models::{
    giveaway::{Giveaway, GiveawayManager},
    response::ResponseResult,
};

pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5);

async fn refresh_giveaway(
    giveaway: Arc<Giveaway>,
    announcer: Arc<dyn Announcer>,
    message: MessageId,
) {
    let mut interval =
        tokio::time::interval_at(Instant::now() + REFRESH_INTERVAL, REFRESH_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        if let Err(err) = announcer
            .edit(
                giveaway.channel,
                message,
                generate_embed(&giveaway),
                Controls::Keep,
            )
            .await
        {
            error!(
                "Could not refresh giveaway message for giveaway {}. Failed with error: {:?}",
                giveaway.id, err
            );
        }
    }
}

/// Posts the giveaway, keeps it refreshed until its duration has elapsed, then
/// closes it. The refresh task is fully stopped before the closing edit.
pub async fn run_giveaway(
    giveaway: &Arc<Giveaway>,
    announcer: Arc<dyn Announcer>,
) -> ResponseResult {
    let started = Instant::now();
    let message = announcer
        .post(giveaway.channel, giveaway.id, generate_embed(giveaway))
        .await?;
    giveaway.open(message);
    info!(
        "Giveaway {} is open in channel {} as message {}",
        giveaway.id, giveaway.channel, message
    );

    let refresher = tokio::spawn(refresh_giveaway(
        giveaway.clone(),
        announcer.clone(),
        message,
    ));

    tokio::time::sleep(giveaway.duration.saturating_sub(started.elapsed())).await;

    refresher.abort();
    if let Err(err) = refresher.await {
        if !err.is_cancelled() {
            error!(
                "Refresh task for giveaway {} failed with error: {:?}",
                giveaway.id, err
            );
        }
    }
    giveaway.close();
    debug!("Giveaway {} closed after {:?}", giveaway.id, started.elapsed());

    end_giveaway(giveaway, announcer.as_ref()).await
}

/// Drives one giveaway to completion and forgets it afterwards.
pub async fn start(
    manager: Arc<GiveawayManager>,
    giveaway: Arc<Giveaway>,
    announcer: Arc<dyn Announcer>,
) {
    let result = run_giveaway(&giveaway, announcer).await;
    manager.remove(giveaway.id);

    if let Err(err) = result {
        error!("Giveaway {} did not finish cleanly: {}", giveaway.id, err);
    }
}
