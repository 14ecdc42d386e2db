use serenity::builder::{CreateEmbed, CreateEmbedFooter};

use crate::models::giveaway::Giveaway;

const GIVEAWAY_COLOR: u32 = 0x9b59b6;
const ENDS_AT_FIELD: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Platform-independent description of the giveaway announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiveawayEmbed {
    pub title: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: String,
}

impl GiveawayEmbed {
    fn add_field(&mut self, name: &str, value: impl Into<String>) {
        self.fields.push(EmbedField {
            name: name.to_string(),
            value: value.into(),
            inline: false,
        });
    }

    fn set_field_at(&mut self, index: usize, name: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.name = name.to_string();
            field.value = value.into();
        }
    }
}

impl From<GiveawayEmbed> for CreateEmbed {
    fn from(embed: GiveawayEmbed) -> Self {
        CreateEmbed::new()
            .title(embed.title)
            .color(embed.color)
            .fields(
                embed
                    .fields
                    .into_iter()
                    .map(|field| (field.name, field.value, field.inline)),
            )
            .footer(CreateEmbedFooter::new(embed.footer))
    }
}

pub fn generate_embed(giveaway: &Giveaway) -> GiveawayEmbed {
    let mut embed = GiveawayEmbed {
        title: "🎉 Giveaway Time!".to_string(),
        color: GIVEAWAY_COLOR,
        fields: Vec::with_capacity(7),
        footer: "Good luck!".to_string(),
    };
    embed.add_field("Prize", giveaway.prize.clone());
    embed.add_field("Host", format!("<@{}>", giveaway.host));
    embed.add_field("Winners", "1");
    embed.add_field("Participants", giveaway.entry_count().to_string());
    embed.add_field(
        "Ends At",
        format!("<t:{}:F>", giveaway.end_time.unix_timestamp()),
    );
    embed.add_field("\u{200b}", "Click the button below to enter!");
    embed
}

/// The open layout with the countdown replaced and the winner appended.
pub fn generate_closed_embed(giveaway: &Giveaway) -> GiveawayEmbed {
    let mut embed = generate_embed(giveaway);
    embed.set_field_at(ENDS_AT_FIELD, "Ends At", "Ended");
    embed.add_field("Winner", format!("<@{}>", giveaway.winner));
    embed
}
