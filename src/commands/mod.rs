pub mod hello;
pub mod predict;

use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::error;

pub const HELP_MESSAGE: &str =
    "Available commands: /hello, /predict STOCK_ID START_YEAR\n\nExample: /predict SENS 2012";

pub async fn handle_message(ctx: &Context, msg: &Message) {
    if msg.author.bot {
        return;
    }

    let parts: Vec<&str> = msg.content.split_whitespace().collect();
    let Some(&command) = parts.first() else {
        return;
    };
    let args = &parts[1..];

    let result = match command {
        "/hello" | "/start" => hello::execute(ctx, msg).await,
        "/predict" => predict::execute(ctx, msg, args).await,
        _ => echo(ctx, msg).await,
    };

    if let Err(e) = result {
        error!("Error executing command {}: {}", command, e);

        let embed = serenity::builder::CreateEmbed::default()
            .title("Command Error")
            .description(format!("❌ {}", e))
            .color(0xff0000);

        let _ = msg
            .channel_id
            .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
            .await;
    }
}

/// Fallback for anything that is not a known command.
async fn echo(ctx: &Context, msg: &Message) -> Result<(), String> {
    msg.reply(
        ctx,
        format!(
            "Sorry, the command is unknown: {}.\n\n{}",
            msg.content, HELP_MESSAGE
        ),
    )
    .await
    .map_err(|e| e.to_string())?;
    Ok(())
}
