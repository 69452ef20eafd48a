use light_bitset::{Bitset, BitsetError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), BitsetError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    for size in [8, 64, 256] {
        let mut bitset = Bitset::new(size)?;
        for idx in (0..size).step_by(3) {
            bitset.set(idx)?;
        }
        bitset.swap(size - 1)?;

        println!("size {size}, {} bits set:", bitset.popcount());
        bitset.dump();
        println!("{bitset:?}");
        println!();
    }

    if let Err(err) = Bitset::new(100) {
        tracing::warn!("{err}");
    }
    Ok(())
}
