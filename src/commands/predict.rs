use std::fs;

use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::{debug, info, warn};

use crate::api::nasdaq::FetchError;
use crate::services::predict_service::{self, PredictError};
use crate::{BotSettings, QuoteClient};

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    info!("Predict command from user {} with args: {:?}", msg.author.id, args);

    let Some(&symbol) = args.first().filter(|s| !s.is_empty()) else {
        msg.reply(ctx, "Please provide a stock ID")
            .await
            .map_err(|e| e.to_string())?;
        return Ok(());
    };
    let from_date_arg = args.get(1).copied();

    let (client, chart_dir) = {
        let data = ctx.data.read().await;
        let client = data
            .get::<QuoteClient>()
            .ok_or("Quote client not initialized".to_string())?
            .clone();
        let chart_dir = data
            .get::<BotSettings>()
            .ok_or("Bot configuration not initialized".to_string())?
            .chart_dir
            .clone();
        (client, chart_dir)
    };

    if let Err(e) = msg.channel_id.broadcast_typing(ctx.http.as_ref()).await {
        warn!("Failed to broadcast typing: {}", e);
    }

    let chart_path =
        match predict_service::run_prediction(&client, symbol, from_date_arg, &chart_dir).await {
            Ok(path) => path,
            Err(PredictError::Fetch(FetchError::Transport(e))) => {
                warn!("Transport failure fetching {}: {}", symbol, e);
                msg.reply(ctx, "Could not reach the quote service. Please try again later.")
                    .await
                    .map_err(|e| e.to_string())?;
                return Ok(());
            }
            Err(e) => {
                warn!("Prediction for {} failed: {}", symbol, e);
                msg.reply(ctx, e.to_string())
                    .await
                    .map_err(|e| e.to_string())?;
                return Ok(());
            }
        };

    let attachment = serenity::all::CreateAttachment::path(&chart_path)
        .await
        .map_err(|e| format!("Failed to attach chart: {}", e))?;

    let message = serenity::builder::CreateMessage::default().add_file(attachment);
    let send_result = msg.channel_id.send_message(ctx, message).await;

    // The file is per-request; remove it once Discord has it. Delay a bit so
    // the upload is not cut off underneath the send.
    let cleanup_path = chart_path.clone();
    tokio::spawn(async move {
        tokio::time::sleep(tokio::time::Duration::from_secs(2)).await;
        match fs::remove_file(&cleanup_path) {
            Ok(_) => debug!("Deleted chart file: {}", cleanup_path.display()),
            Err(e) => warn!("Failed to delete chart file {}: {}", cleanup_path.display(), e),
        }
    });

    send_result.map_err(|e| format!("Failed to send chart: {}", e))?;
    info!("Chart sent for {}", symbol);
    Ok(())
}
