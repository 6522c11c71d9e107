use std::path::Path;
use std::process::exit;

use clap::Parser;

use statement_movements::Bank;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(short, long)]
    filename: String,
    /// Institution identifier (BANAMEX, BANCOAZTE, BANCOMER, BANORTE,
    /// BANREGIO, INBURSA, SANTANDER, SCOTIABANK).
    #[arg(short, long)]
    bank: String,
    /// Write the rows as CSV here instead of printing them.
    #[arg(short, long)]
    output: Option<String>,
}

fn main() {
    let args = Args::parse();
    let bank: Bank = match args.bank.parse() {
        Ok(bank) => bank,
        Err(err) => {
            eprintln!("{err}");
            exit(2);
        }
    };

    let outcome = match bank.parse_file(Path::new(&args.filename)) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("{err}");
            exit(1);
        }
    };

    for advisory in &outcome.advisories {
        eprintln!("aviso: {advisory}");
    }
    if outcome.skipped > 0 {
        eprintln!("aviso: {} registros descartados", outcome.skipped);
    }

    match args.output {
        Some(output) => {
            if let Err(err) = write_csv(&output, &outcome.table) {
                eprintln!("{err}");
                exit(1);
            }
            println!("{} movimientos exportados a {output}", outcome.table.len());
        }
        None => {
            println!("{}", outcome.table.headers().join(" | "));
            for row in outcome.table.rows() {
                println!("{}", row.join(" | "));
            }
        }
    }
}

fn write_csv(
    path: &str,
    table: &statement_movements::MovementTable,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
