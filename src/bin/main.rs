use std::io::Write;
use std::net::IpAddr;

use bmp_ls_parser::models::PeerHeader;
use bmp_ls_parser::Producer;
use bytes::Bytes;
use clap::Parser;
use log::{error, info};

/// bmp-ls-parser decodes one hex-encoded BGP path attribute block into JSON records.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    /// Path attribute block as a hex string, e.g. copied from a packet capture
    #[clap(name = "ATTRIBUTES")]
    attributes: String,

    /// Peer address the update was received from
    #[clap(short = 'p', long, default_value = "0.0.0.0")]
    peer_ip: IpAddr,

    /// Peer AS number
    #[clap(short = 'a', long, default_value_t = 0)]
    peer_asn: u32,

    /// Unix timestamp of the update
    #[clap(short = 't', long, default_value_t = 0)]
    timestamp: u64,

    /// Hash identifying the monitored router
    #[clap(short = 'r', long, default_value = "")]
    router_hash: String,

    /// Address of the monitored router
    #[clap(long)]
    router_ip: Option<IpAddr>,

    /// The session did not negotiate 4-octet AS numbers
    #[clap(long)]
    as2: bool,

    /// Prefix NLRI carry ADD-PATH identifiers
    #[clap(long)]
    add_path: bool,

    /// Pretty-print JSON output
    #[clap(long)]
    pretty: bool,
}

fn main() {
    let opts: Opts = Opts::parse();

    env_logger::init();

    let data = match hex::decode(opts.attributes.trim()) {
        Ok(d) => Bytes::from(d),
        Err(err) => {
            eprintln!("invalid hex input: {}", err);
            std::process::exit(1);
        }
    };

    let peer = PeerHeader {
        peer_ip: opts.peer_ip,
        peer_asn: opts.peer_asn,
        timestamp: opts.timestamp,
    };

    let mut producer = Producer::new(opts.router_hash)
        .with_as4_capable(!opts.as2)
        .with_add_path(opts.add_path);
    if let Some(ip) = opts.router_ip {
        producer = producer.with_router_ip(ip);
    }

    let results = match producer.process_attributes(data, &peer) {
        Ok(r) => r,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    let mut stdout = std::io::stdout();
    let (mut built, mut failed) = (0, 0);
    for result in results {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                error!("{}", err);
                failed += 1;
                continue;
            }
        };
        let output = match opts.pretty {
            true => serde_json::to_string_pretty(&record),
            false => serde_json::to_string(&record),
        };
        match output {
            Ok(line) => {
                built += 1;
                if let Err(e) = writeln!(stdout, "{}", line) {
                    if e.kind() != std::io::ErrorKind::BrokenPipe {
                        eprintln!("{}", e);
                    }
                    std::process::exit(1);
                }
            }
            Err(err) => {
                error!("{}", err);
                failed += 1;
            }
        }
    }
    info!("{} records built, {} failed", built, failed);
}
