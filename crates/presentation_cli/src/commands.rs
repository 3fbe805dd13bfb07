//! Command execution

use api_client::{ApiClient, CreateLinkRequest, Link, LoginRequest};

use crate::{Commands, LinkAction, OrgAction};

/// Execute one CLI command against the backend
pub async fn run(client: &ApiClient, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Login { email, password } => {
            let user = client.login(&LoginRequest { email, password }).await?;
            let role = if user.is_admin { " (admin)" } else { "" };
            println!("Logged in as {}{role}", user.email);
        },

        Commands::Logout => {
            client.logout().await?;
            println!("Logged out");
        },

        Commands::Whoami => {
            let user = client.me().await?;
            println!("{} <{}>", user.name.as_deref().unwrap_or("-"), user.email);
        },

        Commands::Links { action } => run_link_action(client, action).await?,

        Commands::Stats { id } => {
            let stats = client.link_stats(id).await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        },

        Commands::Qr { id, output } => {
            let png = client.link_qr_code(id).await?;
            tokio::fs::write(&output, &png).await?;
            println!("Wrote {} bytes to {}", png.len(), output.display());
        },

        Commands::Orgs { action } => match action {
            OrgAction::List => {
                for org in client.list_organizations().await? {
                    println!("{:>6}  {}", org.id, org.name);
                }
            },
            OrgAction::Members { id } => {
                for member in client.list_members(id).await? {
                    println!("{:>6}  {:<6}  {}", member.user_id, member.role, member.email);
                }
            },
        },

        Commands::Analytics { link, period } => {
            let json = match link {
                Some(id) => serde_json::to_string_pretty(&client.link_analytics(id, period).await?)?,
                None => serde_json::to_string_pretty(&client.analytics_overview().await?)?,
            };
            println!("{json}");
        },
    }

    Ok(())
}

async fn run_link_action(client: &ApiClient, action: LinkAction) -> anyhow::Result<()> {
    match action {
        LinkAction::List => {
            let links = client.list_links().await?;
            if links.is_empty() {
                println!("No links yet");
            }
            for link in &links {
                println!("{}", format_link(link));
            }
        },

        LinkAction::Create {
            url,
            code,
            title,
            folder,
        } => {
            let request = CreateLinkRequest {
                custom_code: code,
                title,
                folder_id: folder,
                ..CreateLinkRequest::new(url)
            };
            let link = client.create_link(&request).await?;
            println!("{}", format_link(&link));
        },

        LinkAction::Delete { id } => {
            client.delete_link(id).await?;
            println!("Deleted link {id}");
        },
    }

    Ok(())
}

/// One-line summary of a link
fn format_link(link: &Link) -> String {
    let short = link.short_url.as_deref().unwrap_or(&link.short_code);
    format!(
        "{:>6}  {short}  ->  {}  ({} clicks)",
        link.id, link.original_url, link.clicks
    )
}
