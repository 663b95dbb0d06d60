//! MQTT weather-enrichment daemon
//!
//! Subscribes to an rtl_433 JSON topic, runs each message through
//! `wxenrich-core`, and republishes the enriched record to
//! `<source-topic>/enrichment`. Messages are independent, so each one is
//! handled on its own task; ordering between messages is neither needed nor
//! preserved.
//!
//! Per-message failures (malformed JSON, unknown model, missing fields) are
//! logged and dropped; they never take the daemon down. Broker connection
//! loss is retried indefinitely, and the subscription is re-established on
//! every reconnect.

mod config;
mod health;

use std::time::Duration;

use clap::Parser;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use wxenrich_core::{enrich_message, EnrichError};

use config::{Args, Config};
use health::Heartbeat;

const MQTT_CHANNEL_CAPACITY: usize = 64;
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = match Config::from_args(Args::parse()) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(%err, "configuration error");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(cfg).await {
        error!(%err, "fatal error");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> std::io::Result<()> {
    let heartbeat = Heartbeat::new(cfg.healthy_interval);
    if let Some(port) = cfg.health_port {
        let hb = heartbeat.clone();
        tokio::spawn(async move {
            if let Err(err) = health::serve(hb, port).await {
                error!(%err, "health endpoint failed");
            }
        });
    }

    let mut options = MqttOptions::new(&cfg.client_id, &cfg.mqtt_host, cfg.mqtt_port);
    options.set_keep_alive(Duration::from_secs(30));
    if let Some((user, pass)) = &cfg.credentials {
        options.set_credentials(user, pass);
    }

    let (client, mut eventloop) = AsyncClient::new(options, MQTT_CHANNEL_CAPACITY);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("signal caught, exiting");
                return Ok(());
            }
            event = eventloop.poll() => match event {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    info!(server = %cfg.mqtt_host, "connected");
                    // Subscribing on every ConnAck re-establishes the
                    // subscription after a reconnect
                    if let Err(err) = client.subscribe(&cfg.source_topic, QoS::AtMostOnce).await {
                        error!(topic = %cfg.source_topic, %err, "failed to subscribe");
                        return Ok(());
                    }
                    info!(topic = %cfg.source_topic, "subscribed");
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    let client = client.clone();
                    let dest_topic = cfg.dest_topic.clone();
                    let hb = heartbeat.clone();
                    tokio::spawn(async move {
                        handle_message(client, dest_topic, hb, &publish.payload).await;
                    });
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(%err, "MQTT connection error, retrying");
                    tokio::time::sleep(RECONNECT_DELAY).await;
                }
            }
        }
    }
}

/// Enrich one raw payload and publish the result
///
/// Every failure path logs and returns; nothing propagates.
async fn handle_message(client: AsyncClient, dest_topic: String, heartbeat: Heartbeat, payload: &[u8]) {
    let raw: serde_json::Value = match serde_json::from_slice(payload) {
        Ok(v) => v,
        Err(err) => {
            warn!(%err, "failed to parse message as JSON");
            return;
        }
    };

    let record = match enrich_message(&raw) {
        Ok(record) => record,
        Err(EnrichError::UnsupportedModel(model)) => {
            debug!(%model, "unsupported model");
            return;
        }
        Err(err) => {
            warn!(%err, "dropping message");
            return;
        }
    };

    let body = match serde_json::to_vec(&record) {
        Ok(body) => body,
        Err(err) => {
            warn!(%err, "failed to serialize enriched record");
            return;
        }
    };

    if let Err(err) = client
        .publish(&dest_topic, QoS::AtMostOnce, false, body)
        .await
    {
        warn!(%err, topic = %dest_topic, "failed to publish enriched record");
        return;
    }

    heartbeat.mark_alive();
}
