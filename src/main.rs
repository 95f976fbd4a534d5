use anyhow::Result;
use colored::*;
use dotenvy::dotenv;
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;
use validator::Validate;

use moto_fleet_client::services::{AuthService, FleetService};
use moto_fleet_client::utils::validation::format_license_plate;
use moto_fleet_client::{
    ApiClient, ApiConfig, MaintenanceHistoryDraft, PaginationParams, RegisterRequest, User,
    VehicleDraft,
};

const PAGE_SIZE: u32 = 10;

/// Dependencias de la consola, creadas una sola vez en `main`
struct Console {
    client: ApiClient,
    auth: AuthService,
    fleet: FleetService,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ApiConfig::from_env()?;
    info!("🏍️ Moto fleet console - API {}", config.base_url);

    let client = ApiClient::new(config)?;
    let console = Console {
        auth: AuthService::new(client.clone()),
        fleet: FleetService::new(client.clone()),
        client,
    };

    println!("{}", "🏍️ Moto Fleet Console".bright_blue().bold());
    println!("{}", "=====================".bright_blue());

    loop {
        println!();
        println!("{}", "📋 MENU PRINCIPAL".bright_green().bold());
        println!("{}", "=================".bright_green());
        println!("1. 🔐 Login");
        println!("2. 📝 Cadastrar usuário");
        println!("3. 🏍️ Listar motos");
        println!("4. ➕ Cadastrar moto");
        println!("5. 🔍 Detalhes da moto");
        println!("6. 🔧 Registrar manutenção");
        println!("7. 🗑️ Remover moto");
        println!("0. 🚪 Sair");

        let choice = prompt("Selecione uma opção: ")?;
        let outcome = match choice.as_str() {
            "1" => console.login().await,
            "2" => console.register().await,
            "3" => console.list_vehicles().await,
            "4" => console.create_vehicle().await,
            "5" => console.show_vehicle().await,
            "6" => console.add_history().await,
            "7" => console.delete_vehicle().await,
            "0" => {
                println!("{}", "👋 Até logo!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opção inválida. Tente novamente.".bright_red());
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("{}", format!("❌ {}", e).bright_red());
        }
    }

    Ok(())
}

impl Console {
    async fn login(&self) -> Result<()> {
        let email = prompt("Email: ")?;
        let password = prompt("Senha: ")?;

        let response = self.auth.login_user(&email, &password).await;
        let message = response.message.clone().unwrap_or_default();
        if response.success {
            println!("{}", format!("✅ {}", message).bright_green().bold());
            if let Some(user) = response.user {
                println!("   Usuário: {} (tipo {})", user.email, user.user_type);
            }
        } else {
            println!("{}", format!("❌ {}", message).bright_red());
        }
        Ok(())
    }

    async fn register(&self) -> Result<()> {
        let request = RegisterRequest {
            email: prompt("Email: ")?,
            password: prompt("Senha: ")?,
            user_type: None,
        };

        match self.auth.register_user(request).await {
            Ok(response) => {
                println!("{}", "✅ Usuário cadastrado!".bright_green().bold());
                if let Some(User { user_id: Some(id), .. }) = response.user {
                    println!("   ID: {}", id);
                }
            }
            Err(e) => println!("{}", format!("❌ {}", e.user_message()).bright_red()),
        }
        Ok(())
    }

    async fn list_vehicles(&self) -> Result<()> {
        let page: u32 = prompt("Página (1): ")?.parse::<u32>().unwrap_or(1).max(1);

        match self.fleet.list_vehicles_page(PaginationParams::new(page, PAGE_SIZE)).await {
            Ok(result) => {
                println!(
                    "{}",
                    format!("🏍️ Página {} de {}", page, result.total_pages)
                        .bright_cyan()
                        .bold()
                );
                if result.items.is_empty() {
                    println!("{}", "⚠️ Nenhuma moto encontrada".bright_yellow());
                }
                for vehicle in &result.items {
                    println!(
                        "   {}  {}  {}",
                        vehicle.vehicle_id.as_deref().unwrap_or("-"),
                        format_license_plate(&vehicle.license_plate),
                        vehicle.vehicle_model
                    );
                }
            }
            Err(e) => println!("{}", format!("❌ {}", e.user_message()).bright_red()),
        }
        Ok(())
    }

    async fn create_vehicle(&self) -> Result<()> {
        let plate = prompt("Placa (ABC-1234): ")?;
        let model = prompt("Modelo: ")?;

        let draft = VehicleDraft::new(&plate, &model);
        if let Err(errors) = draft.validate() {
            println!("{}", format!("❌ Dados inválidos: {}", errors).bright_red());
            return Ok(());
        }

        let response = self.client.create_vehicle(&draft).await?;
        if response.is_success() {
            println!(
                "{}",
                format!("✅ Moto {} cadastrada!", format_license_plate(&plate))
                    .bright_green()
                    .bold()
            );
        } else {
            let message = response
                .error_message()
                .unwrap_or_else(|| response.status.to_string());
            println!("{}", format!("❌ {}", message).bright_red());
        }
        Ok(())
    }

    async fn show_vehicle(&self) -> Result<()> {
        let id = prompt("ID da moto: ")?;

        match self.fleet.vehicle_overview(&id).await {
            Ok(overview) => {
                println!(
                    "{}",
                    format!(
                        "🏍️ {} - {}",
                        format_license_plate(&overview.vehicle.license_plate),
                        overview.vehicle.vehicle_model
                    )
                    .bright_cyan()
                    .bold()
                );
                if overview.histories.is_empty() {
                    println!("{}", "⚠️ Sem histórico de manutenção".bright_yellow());
                }
                for history in &overview.histories {
                    let cost = history
                        .cost
                        .map(|c| format!("R$ {:.2}", c))
                        .unwrap_or_else(|| "-".to_string());
                    println!("   {}  {}  {}", history.date, history.description, cost);
                }
                println!("   Total: R$ {:.2}", overview.total_cost());
            }
            Err(e) => println!("{}", format!("❌ {}", e.user_message()).bright_red()),
        }
        Ok(())
    }

    async fn add_history(&self) -> Result<()> {
        let vehicle_id = prompt("ID da moto: ")?;
        let description = prompt("Descrição: ")?;
        let date = prompt("Data (DD/MM/AAAA): ")?;
        let cost = prompt("Custo (opcional): ")?;

        let draft = MaintenanceHistoryDraft {
            vehicle_id: Some(vehicle_id),
            description: Some(description),
            date: Some(date),
            cost: cost.replace(',', ".").parse().ok(),
        };
        if let Err(errors) = draft.validate() {
            println!("{}", format!("❌ Dados inválidos: {}", errors).bright_red());
            return Ok(());
        }

        let response = self.client.create_maintenance_history(&draft).await?;
        if response.is_success() {
            println!("{}", "✅ Manutenção registrada!".bright_green().bold());
        } else {
            println!("{}", format!("❌ Erro {}", response.status).bright_red());
        }
        Ok(())
    }

    async fn delete_vehicle(&self) -> Result<()> {
        let id = prompt("ID da moto: ")?;
        let confirm = prompt(&format!("Remover a moto {}? (s/N): ", id))?;
        if !confirm.eq_ignore_ascii_case("s") {
            return Ok(());
        }

        let response = self.client.delete_vehicle(&id).await?;
        if response.is_success() {
            println!("{}", "✅ Moto removida".bright_green());
        } else {
            println!("{}", format!("❌ Erro {}", response.status).bright_red());
        }
        Ok(())
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
