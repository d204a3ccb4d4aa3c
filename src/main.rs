use std::io::Write;

use anyhow::Result;
use refract::readout::{self, Readout};
use refract::settings;
use tracing::info;

fn main() -> Result<()> {
    refract::logging::init()?;
    let settings = settings::load_config()?;

    if settings.stdin {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let count = readout::stream_readouts(stdin.lock(), &mut stdout.lock())?;
        info!("processed {} readouts from stdin", count);
        return Ok(());
    }

    let readout = Readout::new(settings.alpha, settings.n1, settings.n2)?;
    println!("{}", readout);
    match readout.critical_label() {
        Some(label) if readout.exceeds_critical() => println!("{} (exceeded)", label),
        Some(label) => println!("{}", label),
        None => info!("n1 <= n2, every incidence angle refracts"),
    }

    if let Some(sweep) = &settings.sweep {
        let table = sweep.run(settings.n1, settings.n2)?;
        match &settings.output {
            Some(path) => table.writeup(path)?,
            None => {
                let stdout = std::io::stdout();
                let mut lock = stdout.lock();
                table.write_table(&mut lock)?;
                lock.flush()?;
            }
        }
    }

    Ok(())
}
