use serenity::model::channel::Message;
use serenity::prelude::Context;

use super::HELP_MESSAGE;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    msg.reply(
        ctx,
        format!("Hello, {}! {}", msg.author.name, HELP_MESSAGE),
    )
    .await
    .map_err(|e| e.to_string())?;
    Ok(())
}
