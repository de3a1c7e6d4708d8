use clap::{Parser, Subcommand};
use std::sync::Arc;

use haven_core::{db_path_from_env_value, NewBed, NewReferral, ShelterService, Store};

#[derive(Parser)]
#[command(name = "haven")]
#[command(about = "Haven shelter-bed and referral tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the referral queue
    List,
    /// Record a new referral
    Intake {
        /// Client first name
        first_name: String,
        /// Client last initial
        last_initial: String,
        /// Referral partner, e.g. "Self-Referral"
        partner: String,
        /// Urgency level (critical/high/medium/low)
        #[arg(long)]
        urgency: Option<String>,
        /// Requested bed type
        #[arg(long)]
        bed_type: Option<String>,
    },
    /// Replace the bed inventory with the default 12-bed set
    SeedBeds,
    /// Print the dashboard statistics snapshot
    Stats,
}

/// Default inventory: Workforce W1-W8 and Medical Step-Down M1-M4.
fn default_beds() -> Vec<NewBed> {
    let mut beds = Vec::new();
    for i in 1..=8 {
        beds.push(NewBed {
            id: Some(format!("bed-w{i}")),
            bed_number: format!("W{i}"),
            facility_id: "workforce".into(),
            facility_name: "Workforce".into(),
            status: Some("available".into()),
        });
    }
    for i in 1..=4 {
        beds.push(NewBed {
            id: Some(format!("bed-m{i}")),
            bed_number: format!("M{i}"),
            facility_id: "medical".into(),
            facility_name: "Medical Step-Down".into(),
            status: Some("available".into()),
        });
    }
    beds
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let db_path = db_path_from_env_value(std::env::var("HAVEN_DB_PATH").ok());
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let service = ShelterService::new(Arc::new(Store::open(&db_path)?));

    match cli.command {
        Some(Commands::List) => {
            let referrals = service.list_referrals()?;
            if referrals.is_empty() {
                println!("No referrals found.");
            } else {
                for referral in referrals {
                    println!(
                        "ID: {}, Client: {} {}., Partner: {}, Status: {}, Urgency: {}",
                        referral.id,
                        referral.first_name,
                        referral.last_initial,
                        referral.referral_partner,
                        referral.status,
                        if referral.urgency.is_empty() {
                            "-"
                        } else {
                            &referral.urgency
                        }
                    );
                }
            }
        }
        Some(Commands::Intake {
            first_name,
            last_initial,
            partner,
            urgency,
            bed_type,
        }) => {
            let input = NewReferral {
                first_name,
                last_initial,
                referral_partner: partner,
                urgency: urgency.unwrap_or_default(),
                bed_type: bed_type.unwrap_or_default(),
                ..NewReferral::default()
            };
            match service.create_referral(input) {
                Ok(referral) => println!("Created referral {}", referral.id),
                Err(e) => eprintln!("Error creating referral: {}", e),
            }
        }
        Some(Commands::SeedBeds) => {
            let beds = service.replace_beds(default_beds())?;
            println!("Replaced bed inventory with {} default beds.", beds.len());
        }
        Some(Commands::Stats) => {
            let stats = service.dashboard_stats()?;
            println!("Total referrals:    {}", stats.total_referrals);
            println!("Pending referrals:  {}", stats.pending_referrals);
            println!("Placed this week:   {}", stats.placed_this_week);
            println!("Waitlisted clients: {}", stats.waitlisted_clients);
            println!(
                "Beds available:     {} / {}",
                stats.total_beds_available, stats.total_beds
            );
            println!("Occupancy rate:     {}%", stats.occupancy_rate);
            println!("Avg placement time: {}", stats.avg_placement_time);
        }
        None => {
            println!("No command provided. Try `haven --help`.");
        }
    }

    Ok(())
}
