use std::{future::Future, sync::Arc};

use serenity::all::{ChannelId, CommandInteraction, UserId};
use tracing::{debug, info, warn};

use super::{
    announcer::{Announcer, HttpAnnouncer},
    lifecycle,
};
use crate::{
    common::{
        duration::{Duration, CLAIM_UNITS, GIVEAWAY_UNITS},
        options::Options,
    },
    models::{
        command::{CommandContext, CommandContextReply},
        giveaway::{Giveaway, GiveawayError, GiveawayManager, NewGiveaway},
        handler::Handler,
        response::{Response, ResponseError, ResponseResult},
    },
};

#[derive(Debug, Clone)]
pub struct GiveawayRequest {
    pub prize: String,
    pub duration: String,
    pub winner: UserId,
    pub host: UserId,
    pub channel_id: String,
    pub claim_time: String,
}

async fn resolve_channel(
    announcer: &dyn Announcer,
    channel_id: &str,
) -> Result<ChannelId, GiveawayError> {
    let Ok(id) = channel_id.parse::<u64>() else {
        return Err(GiveawayError::ChannelNotFound);
    };
    if id == 0 {
        return Err(GiveawayError::ChannelNotFound);
    }

    match announcer.fetch_channel(ChannelId::new(id)).await {
        Ok(channel) => Ok(channel),
        Err(err) => {
            debug!("Could not resolve channel {}: {}", channel_id, err);
            Err(GiveawayError::ChannelNotFound)
        }
    }
}

/// Validates a request in order (owner, channel, duration, claim time) and
/// registers the giveaway. Nothing is registered when validation fails.
pub async fn create_giveaway(
    manager: &GiveawayManager,
    announcer: &dyn Announcer,
    caller: UserId,
    owner: UserId,
    request: GiveawayRequest,
) -> Result<Arc<Giveaway>, GiveawayError> {
    if caller != owner {
        return Err(GiveawayError::Unauthorized);
    }

    let channel = resolve_channel(announcer, &request.channel_id).await?;

    let duration = Duration::parse(&request.duration, GIVEAWAY_UNITS).map_err(|err| {
        debug!("Rejected duration {}: {}", request.duration, err);
        GiveawayError::InvalidDuration
    })?;
    let Some(end_time) = duration.to_timestamp(time::OffsetDateTime::now_utc()) else {
        return Err(GiveawayError::InvalidDuration);
    };

    if let Err(err) = Duration::validate(&request.claim_time, CLAIM_UNITS) {
        debug!("Rejected claim time {}: {}", request.claim_time, err);
        return Err(GiveawayError::InvalidClaimTime);
    }

    Ok(manager.register(NewGiveaway {
        channel,
        prize: request.prize,
        duration: duration.to_std(),
        end_time,
        winner: request.winner,
        host: request.host,
        claim_time: request.claim_time,
    }))
}

/// Forgets a registered giveaway again when its acknowledgement fails, since
/// its lifecycle never starts.
async fn acknowledge(
    manager: &GiveawayManager,
    giveaway: &Giveaway,
    ack: impl Future<Output = ResponseResult>,
) -> ResponseResult {
    if let Err(err) = ack.await {
        warn!(
            "Dropping giveaway {} because it could not be acknowledged: {}",
            giveaway.id, err
        );
        manager.remove(giveaway.id);
        return Err(err);
    }
    Ok(())
}

fn read_request(cmd: &CommandInteraction) -> Result<GiveawayRequest, ResponseError> {
    let options = Options {
        options: cmd.data.options(),
    };

    let missing = || {
        ResponseError::Execution(
            "Could not read the giveaway options",
            Some("Please notify the developer of this issue".to_string()),
        )
    };

    Ok(GiveawayRequest {
        prize: options.get_string("prize").ok_or_else(missing)?,
        duration: options.get_string("duration").ok_or_else(missing)?,
        winner: options.get_user("winner").ok_or_else(missing)?.id,
        host: options.get_user("host").ok_or_else(missing)?.id,
        channel_id: options.get_string("channel_id").ok_or_else(missing)?,
        claim_time: options.get_string("claim_time").ok_or_else(missing)?,
    })
}

pub async fn new(
    handler: &Handler,
    ctx: &CommandContext,
    cmd: &CommandInteraction,
) -> ResponseResult {
    let request = read_request(cmd)?;
    let announcer: Arc<dyn Announcer> = Arc::new(HttpAnnouncer::new(ctx.ctx.http.clone()));

    let giveaway = create_giveaway(
        &handler.giveaways,
        announcer.as_ref(),
        cmd.user.id,
        ctx.guild.owner_id,
        request,
    )
    .await?;
    info!(
        "Giveaway {} for {} created by {} in guild {} ({} running)",
        giveaway.id,
        giveaway.prize,
        cmd.user.id,
        ctx.guild.id,
        handler.giveaways.active_count()
    );

    acknowledge(
        &handler.giveaways,
        &giveaway,
        ctx.reply(cmd, Response::private("Giveaway created!")),
    )
    .await?;

    tokio::spawn(lifecycle::start(
        handler.giveaways.clone(),
        giveaway,
        announcer,
    ));
    Ok(())
}
