mod api;

use anyhow::Result;
use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};
use colored::*;
use std::io::{self, Write};

use api::{MotorApi, Vehicle};

const VEHICLES_PER_PAGE: usize = 10;

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚗 Motor Platform".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());

    let base_url = std::env::var("MOTOR_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    println!("{} {}", "🌐 API:".bright_blue(), base_url);

    let api = MotorApi::new(&base_url)?;
    let mut current_page = 1;

    loop {
        let has_previous;
        let has_next;

        match api.list(current_page, VEHICLES_PER_PAGE).await {
            Ok(page) => {
                current_page = page.page;
                has_previous = page.has_previous;
                has_next = page.has_next;
                print_page(&page);
            }
            Err(e) => {
                println!("{}", format!("❌ No se pudo obtener el listado: {}", e).bright_red());
                has_previous = false;
                has_next = false;
            }
        }

        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("p. ⬅️  Previous    n. ➡️  Next");
        println!("s. 🔑 Seleccionar vehículo");
        println!("r. 🔄 Recargar catálogo");
        println!("a. ℹ️  Sobre MotorPlatform");
        println!("q. 🚪 Salir");

        let choice = prompt("Selecciona una opción: ")?;
        match choice.as_str() {
            "p" if has_previous => current_page -= 1,
            "n" if has_next => current_page += 1,
            "p" | "n" => println!("{}", "⚠️ No hay más páginas en esa dirección".bright_yellow()),
            "s" => select_vehicle(&api).await?,
            "r" => match api.refresh().await {
                Ok(response) => {
                    let count = response.data.map(|d| d.count).unwrap_or_default();
                    println!("{}", format!("✅ {} vehículos cargados", count).bright_green());
                    current_page = 1;
                }
                Err(e) => println!("{}", format!("❌ {}", e).bright_red()),
            },
            "a" => match api.about().await {
                Ok(about) => {
                    println!();
                    println!("{}", about.name.bright_blue().bold());
                    println!("{}", about.description);
                    println!("{} {}", "Our Values:".bright_cyan(), about.values.join(", "));
                }
                Err(e) => println!("{}", format!("❌ {}", e).bright_red()),
            },
            "q" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red()),
        }
    }

    Ok(())
}

fn print_page(page: &api::Page) {
    println!();
    println!(
        "{}",
        format!("🚘 Vehículos - página {} de {} ({} en total)", page.page, page.total_pages.max(1), page.total)
            .bright_cyan()
            .bold()
    );

    if page.items.is_empty() {
        println!("{}", "⚠️ No hay vehículos cargados".bright_yellow());
        return;
    }

    for vehicle in &page.items {
        if vehicle.is_available() {
            println!("  ✅ {:>6}  {}", vehicle.id, vehicle.name);
        } else {
            println!("  ❌ {:>6}  {}", vehicle.id, vehicle.name.dimmed());
        }
    }
}

async fn select_vehicle(api: &MotorApi) -> Result<()> {
    let id = match prompt("ID del vehículo: ")?.parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            println!("{}", "❌ ID inválido".bright_red());
            return Ok(());
        }
    };

    let vehicle = match api.get(id).await {
        Ok(vehicle) => vehicle,
        Err(e) => {
            println!("{}", format!("❌ {}", e).bright_red());
            return Ok(());
        }
    };

    if vehicle.is_available() {
        checkout_form(api, &vehicle).await
    } else {
        return_form(api, &vehicle).await
    }
}

async fn checkout_form(api: &MotorApi, vehicle: &Vehicle) -> Result<()> {
    println!();
    println!("{}", "📝 VEHICLE FORM".bright_cyan().bold());
    println!("{}", vehicle.name.bold());

    let name = prompt("Name: ")?;
    if name.is_empty() {
        println!("{}", "❌ El nombre es obligatorio".bright_red());
        return Ok(());
    }
    let Some(time) = prompt_time("Time (HH:MM, vacío = ahora): ")? else {
        return Ok(());
    };

    println!("1. Loan");
    println!("2. Test Drive");
    let checkout_type = match prompt("Tipo (1-2, vacío = Loan): ")?.as_str() {
        "2" => "test-drive",
        _ => "loan",
    };

    match api.checkout(vehicle.id, &name, &time.to_rfc3339(), checkout_type).await {
        Ok(response) => println!(
            "{}",
            format!("✅ {}", response.message.unwrap_or_default()).bright_green()
        ),
        Err(e) => println!("{}", format!("❌ {}", e).bright_red()),
    }
    Ok(())
}

async fn return_form(api: &MotorApi, vehicle: &Vehicle) -> Result<()> {
    println!();
    println!("{}", "📝 RETURN FORM".bright_cyan().bold());
    println!("{}", vehicle.name.bold());
    if let (Some(holder), Some(time)) = (&vehicle.holder_name, &vehicle.time) {
        let kind = vehicle.checkout_type.as_deref().unwrap_or("loan");
        println!("{}", format!("   En manos de {} desde {} ({})", holder, time, kind).dimmed());
    }

    let condition = prompt("Condition: ")?;
    if condition.is_empty() {
        println!("{}", "❌ La condición es obligatoria".bright_red());
        return Ok(());
    }
    let Some(return_time) = prompt_time("Return Time (HH:MM, vacío = ahora): ")? else {
        return Ok(());
    };

    match api.checkin(vehicle.id, &return_time.to_rfc3339(), &condition).await {
        Ok(response) => {
            println!("{}", format!("✅ {}", response.message.unwrap_or_default()).bright_green());
            if let Some(returned) = response.data {
                if let (Some(condition), Some(at)) = (returned.condition, returned.return_time) {
                    println!("{}", format!("   Devuelto {} - {}", at, condition).dimmed());
                }
            }
        }
        Err(e) => println!("{}", format!("❌ {}", e).bright_red()),
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn prompt_time(label: &str) -> Result<Option<DateTime<Utc>>> {
    let input = prompt(label)?;
    let parsed = parse_time_input(&input, Local::now());
    if parsed.is_none() {
        println!("{}", "❌ Hora inválida".bright_red());
    }
    Ok(parsed)
}

/// Vacío = ahora, `HH:MM` = hoy a esa hora local, o un RFC 3339 completo
fn parse_time_input(input: &str, now: DateTime<Local>) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return Some(now.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    let time = NaiveTime::parse_from_str(input, "%H:%M").ok()?;
    let naive = now.date_naive().and_time(time);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_input() {
        let now = Local::now();
        assert_eq!(parse_time_input("", now), Some(now.with_timezone(&Utc)));
        assert_eq!(
            parse_time_input("2024-01-01T10:00:00Z", now),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap())
        );

        let today = parse_time_input("09:30", now).unwrap().with_timezone(&Local);
        assert_eq!(today.date_naive(), now.date_naive());
        assert_eq!(today.format("%H:%M").to_string(), "09:30");

        assert!(parse_time_input("half past nine", now).is_none());
    }
}
