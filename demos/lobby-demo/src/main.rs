use std::sync::Arc;

use kingsguard::prelude::*;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Card pool
// ---------------------------------------------------------------------------

fn court_of_crowns() -> Result<CardPool, CardPoolError> {
    CardPool::new([
        Card::new("The Queen", RoleType::Leader)
            .with_description("Everyone knows who you are. Survive."),
        Card::new("Shieldmaiden", RoleType::Guardian)
            .with_description("Keep the Queen alive."),
        Card::new("Bodyguard", RoleType::Guardian).with_flavor("Steel before silk."),
        Card::new("Oracle", RoleType::Guardian),
        Card::new("Poisoner", RoleType::Assassin)
            .with_description("The Queen must fall."),
        Card::new("Archer", RoleType::Assassin),
        Card::new("Usurper", RoleType::Traitor)
            .with_description("Be the last one standing."),
    ])
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct Seat {
    player: String,
    card: Option<String>,
    role: Option<RoleType>,
    revealed: bool,
}

fn seating(room: &Room) -> Vec<Seat> {
    room.active_players()
        .iter()
        .map(|handle| {
            let player = handle.read();
            Seat {
                player: player.name.clone(),
                card: player.role.as_ref().map(|card| card.name.clone()),
                role: player.role.as_ref().map(|card| card.role_type),
                revealed: player.role_revealed,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let settings = ServerSettings {
        countdown_secs: 1,
        ..ServerSettings::default()
    };
    let service = Arc::new(settings.role_service(Arc::new(court_of_crowns()?)));
    let starter = GameStarter::from_settings(&settings, Arc::clone(&service));

    let room = Room::new("KING", 5, service.create_from_preset("standard", 5)?);
    room.add_player(Player::host("host", "Marguerite", "session-host"))?;
    for (i, name) in ["Ann", "Bo", "Cyd", "Dara", "Eli"].into_iter().enumerate() {
        room.add_player(Player::new(format!("p{i}"), name, format!("session-{i}")))?;
    }

    let validation = room.get_validation_state(&service);
    tracing::info!(
        can_start = validation.can_start,
        message = %validation.validation_message,
        "validated room"
    );

    let report = starter.start(&room).await?;
    tracing::info!(distribution = ?report.distribution, "dealt");

    println!("{}", serde_json::to_string_pretty(&room.info())?);
    println!("{}", serde_json::to_string_pretty(&seating(&room))?);

    starter.finish(&room)?;
    Ok(())
}
