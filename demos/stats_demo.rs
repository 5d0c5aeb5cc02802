use std::collections::hash_map::RandomState;

use chain_hash::ChainedHashMap;
use chain_hash::Config;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'n', long = "entries", default_value_t = 1000)]
    entries: u64,

    #[arg(short = 's', long = "slot_count", default_value_t = chain_hash::DEFAULT_SLOT_COUNT)]
    slot_count: usize,

    #[arg(short = 't', long = "resize_threshold", default_value_t = chain_hash::DEFAULT_RESIZE_THRESHOLD)]
    resize_threshold: f64,

    #[arg(short = 'c', long = "chain_capacity", default_value_t = chain_hash::DEFAULT_CHAIN_CAPACITY)]
    chain_capacity: usize,

    /// Remove every other entry after filling the map.
    #[arg(long)]
    remove_half: bool,
}

fn main() {
    let args = Args::parse();

    let config = Config::default()
        .with_slot_count(args.slot_count)
        .with_resize_threshold(args.resize_threshold)
        .with_chain_capacity(args.chain_capacity);

    println!(
        "Creating ChainedHashMap with {} slots, resize threshold {}, chain capacity {}",
        config.slot_count, config.resize_threshold, config.chain_capacity
    );

    let mut map: ChainedHashMap<u64, u64, RandomState> =
        match ChainedHashMap::with_config_and_hasher(config, RandomState::new()) {
            Ok(map) => map,
            Err(err) => {
                eprintln!("invalid configuration: {err}");
                std::process::exit(2);
            }
        };

    println!("Filling map with {} u64 values...", args.entries);
    for value in 0..args.entries {
        if map.insert(value, value).is_some() {
            panic!("Value already exists in map: {}", value);
        }
    }

    if args.remove_half {
        for value in (0..args.entries).step_by(2) {
            map.remove(&value);
        }
        println!("Removed every other value");
    }

    println!("Map holds {} values in {} slots", map.len(), map.slot_count());
    println!(
        "Final load factor: {:.2} (threshold {})",
        map.load_factor(),
        map.resize_threshold()
    );

    map.print_chain_length_histogram();
    map.stats().print();
}
