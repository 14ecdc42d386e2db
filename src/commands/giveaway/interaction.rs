use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serenity::{
    all::{ButtonStyle, UserId},
    builder::{CreateActionRow, CreateButton},
};
use tracing::{debug, error};

use crate::models::{
    command::{InteractionContext, InteractionContextReply},
    giveaway::{Giveaway, GiveawayId, GiveawayManager, JoinOutcome, LeaveOutcome},
    handler::Handler,
    response::Response,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum EntryAction {
    Join,
    Leave,
    Participants,
}

pub fn custom_id(action: EntryAction, giveaway: GiveawayId) -> String {
    format!("giveaway:{}:{giveaway}", action.as_ref())
}

/// Returns `None` for components that do not belong to a giveaway.
pub fn parse_custom_id(custom_id: &str) -> Option<(EntryAction, GiveawayId)> {
    lazy_static! {
        static ref CUSTOM_ID_REGEX: Regex =
            Regex::new(r"^giveaway:([a-z]+):(\d+)$").expect("custom id regex is valid");
    }

    let captures = CUSTOM_ID_REGEX.captures(custom_id)?;
    let action = EntryAction::from_str(captures.get(1)?.as_str()).ok()?;
    let id = captures.get(2)?.as_str().parse::<GiveawayId>().ok()?;
    Some((action, id))
}

pub fn entry_buttons(giveaway: GiveawayId) -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(vec![
        CreateButton::new(custom_id(EntryAction::Join, giveaway))
            .label("🎉 Enter Giveaway")
            .style(ButtonStyle::Success),
        CreateButton::new(custom_id(EntryAction::Leave, giveaway))
            .label("🚪 Exit Giveaway")
            .style(ButtonStyle::Danger),
        CreateButton::new(custom_id(EntryAction::Participants, giveaway))
            .label("🧍 Participants")
            .style(ButtonStyle::Secondary),
    ])]
}

const ENDED: &str = "This giveaway has ended.";

pub fn respond(giveaway: &Giveaway, action: EntryAction, user: UserId) -> String {
    match action {
        EntryAction::Join => match giveaway.join(user) {
            JoinOutcome::Entered => "You have entered the giveaway!",
            JoinOutcome::AlreadyEntered => "You already entered this giveaway!",
            JoinOutcome::Closed => ENDED,
        }
        .to_string(),
        EntryAction::Leave => match giveaway.leave(user) {
            LeaveOutcome::Exited => "You have exited the giveaway.",
            LeaveOutcome::NotParticipating => "You are not participating in this giveaway.",
            LeaveOutcome::Closed => ENDED,
        }
        .to_string(),
        EntryAction::Participants => {
            let participants = giveaway.participants();
            if participants.is_empty() {
                return "No participants yet.".to_string();
            }
            let list = participants
                .iter()
                .enumerate()
                .map(|(index, user)| format!("- {}. <@{user}>", index + 1))
                .collect::<Vec<_>>()
                .join("\n");
            format!("**Participants:**\n{list}")
        }
    }
}

/// Giveaways that already left the registry answer every button with the
/// ended notice.
pub fn respond_by_id(
    giveaways: &GiveawayManager,
    id: GiveawayId,
    action: EntryAction,
    user: UserId,
) -> String {
    match giveaways.get(id) {
        Some(giveaway) => respond(&giveaway, action, user),
        None => ENDED.to_string(),
    }
}

pub async fn giveaway_entry_handler(handler: &Handler, ctx: InteractionContext) {
    let Some((action, id)) = parse_custom_id(&ctx.interaction.data.custom_id) else {
        return;
    };
    let user = ctx.interaction.user.id;
    debug!("User {} pressed {:?} on giveaway {}", user, action, id);

    let content = respond_by_id(&handler.giveaways, id, action, user);

    if let Err(err) = ctx.reply(Response::private(content)).await {
        error!(
            "Could not answer {:?} for giveaway {}. Failed with error: {:?}",
            action, id, err
        );
    }
}
