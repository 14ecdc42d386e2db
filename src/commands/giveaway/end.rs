use tracing::{error, info};

use super::{
    announcer::{Announcer, Controls},
    embed::generate_closed_embed,
};
use crate::models::{
    giveaway::{Giveaway, GiveawayPhase},
    response::{ResponseError, ResponseResult},
};

pub fn winner_announcement(giveaway: &Giveaway) -> String {
    format!(
        "🎁 The **{} Giveaway** has ended!\n🏆 The winner is **<@{}>**!\n🎟 Make a ticket in support with the reason giveaway claim before {} or the giveaway will be rerolled.",
        giveaway.prize, giveaway.winner, giveaway.claim_time
    )
}

/// Swaps the announcement to its closed layout, drops the buttons and replies
/// with the winner.
pub async fn end_giveaway(giveaway: &Giveaway, announcer: &dyn Announcer) -> ResponseResult {
    let Some(message) = giveaway.message() else {
        return Err(ResponseError::Execution(
            "This giveaway was never posted",
            None,
        ));
    };
    if giveaway.phase() != GiveawayPhase::Closed {
        return Err(ResponseError::Execution(
            "This giveaway is still open",
            None,
        ));
    }

    if let Err(err) = announcer
        .edit(
            giveaway.channel,
            message,
            generate_closed_embed(giveaway),
            Controls::Remove,
        )
        .await
    {
        error!(
            "Could not update giveaway message to end giveaway {}. Failed with error: {:?}",
            giveaway.id, err
        );
        return Err(err);
    }

    if let Err(err) = announcer
        .reply(giveaway.channel, message, winner_announcement(giveaway))
        .await
    {
        error!(
            "Could not send giveaway winner message for giveaway {}. Failed with error: {:?}",
            giveaway.id, err
        );
        return Err(err);
    }

    info!(
        "Giveaway {} ended with {} participants",
        giveaway.id,
        giveaway.entry_count()
    );
    Ok(())
}
