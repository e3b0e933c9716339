//! rust-radius: encode, decode, and send RADIUS packets from the command line.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rust_radius::codes::PacketCode;
use rust_radius::config::Config;
use rust_radius::dictionary::Dictionary;
use rust_radius::packet::Packet;
use rust_radius::transport::RadiusClient;
use rust_radius::{RadiusError, Result};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an Access-Request and print it as hex
    Encode {
        /// RADIUS shared secret
        #[arg(short, long)]
        secret: String,

        /// User-Name
        #[arg(short, long)]
        username: String,

        /// User-Password
        #[arg(short, long)]
        password: String,
    },

    /// Decode a hex-encoded packet and print its attributes
    Decode {
        /// RADIUS shared secret
        #[arg(short, long)]
        secret: String,

        /// Packet bytes, hex-encoded
        hex: String,
    },

    /// Send an Access-Request and print the reply
    Send {
        /// Path to a client configuration file
        #[arg(short, long, default_value = "radius-client.toml")]
        config: PathBuf,

        /// User-Name
        #[arg(short, long)]
        username: String,

        /// User-Password
        #[arg(short, long)]
        password: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Encode {
            secret,
            username,
            password,
        } => {
            let mut packet = Packet::request(PacketCode::AccessRequest, secret)?;
            packet.set_username(&username);
            packet.set_password(&password);
            let buf = packet.encode()?;
            tracing::info!(bytes = buf.len(), "encoded Access-Request");
            println!("{}", hex_encode(&buf));
        }
        Commands::Decode { secret, hex } => {
            let buf = hex_decode(&hex)?;
            let packet = Packet::decode_request(secret, &buf)?;
            let dictionary = Dictionary::standard();
            print!("{}", packet.describe(&dictionary));
        }
        Commands::Send {
            config,
            username,
            password,
        } => {
            let config = Config::from_file(&config)?;
            let client = RadiusClient::new(config.auth_addr(), config.secret.clone())
                .with_timeout(config.timeout());

            let mut request = client.new_request(PacketCode::AccessRequest)?;
            request.set_username(&username);
            request.set_password(&password);

            tracing::info!(server = %config.auth_addr(), "sending Access-Request");
            let reply = client.send(&mut request)?;
            let dictionary = Dictionary::standard();
            print!("{}", reply.describe(&dictionary));
        }
    }

    Ok(())
}

fn hex_encode(buf: &[u8]) -> String {
    buf.iter().map(|b| format!("{b:02x}")).collect()
}

fn hex_decode(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    if text.len() % 2 != 0 {
        return Err(RadiusError::MalformedPacket(
            "hex input must have an even number of digits".into(),
        ));
    }
    (0..text.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&text[i..i + 2], 16)
                .map_err(|_| RadiusError::MalformedPacket(format!("invalid hex digit at offset {i}")))
        })
        .collect()
}
