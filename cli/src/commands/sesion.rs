use anyhow::{Context, bail};
use colored::*;
use console::Term;
use padron_common::config::{ClientConfig, Config};
use padron_core::{ApiError, AuthContext};

use crate::commands::connect;
use crate::success;
use crate::terminal::{colors, format, print, spinner};

pub async fn login(email: &str, password: Option<String>, cfg: &Config) -> anyhow::Result<()> {
    let password = match password {
        Some(password) => password,
        None => {
            let term = Term::stderr();
            term.write_str("Password: ")?;
            term.read_secure_line().context("cannot read the password")?
        }
    };
    if password.is_empty() {
        bail!("password cannot be empty");
    }

    let client = connect(cfg).await?;
    let waiting = spinner::waiting_for(&cfg.server);
    let usuario = match spinner::run(&waiting, cfg.quiet, client.login(email, &password)).await {
        Ok(usuario) => usuario,
        Err(ApiError::Http { status: 400 | 401, message, .. }) => bail!("login rejected: {message}"),
        Err(e) => return Err(e).context("login failed"),
    };

    let ctx = match usuario {
        Some(usuario) => AuthContext::from_usuario(usuario),
        None => AuthContext::load(&client).await?,
    };

    if cfg.json {
        return print::json(&ctx.usuario);
    }
    success!(
        "Logged in as {} ({})",
        email.color(colors::EMAIL).bold(),
        format::user_type(ctx.user_type)
    );
    Ok(())
}

pub async fn logout(cfg: &Config) -> anyhow::Result<()> {
    let client = connect(cfg).await?;
    if !client.session().is_authenticated() && client.session().refresh_cookie().is_none() {
        print::print_status("No active session");
        return Ok(());
    }
    client.logout().await?;
    success!("Session closed");
    Ok(())
}

pub async fn whoami(cfg: &Config) -> anyhow::Result<()> {
    let client = connect(cfg).await?;
    let ctx = match AuthContext::load(&client).await {
        Ok(ctx) => ctx,
        Err(ApiError::NotAuthenticated | ApiError::SessionExpired) => {
            print::print_status("Not logged in");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if cfg.json {
        return print::json(&ctx.usuario);
    }
    let Some(usuario) = &ctx.usuario else {
        bail!("the server did not describe the account");
    };

    print::header("account", cfg.quiet);
    print::tree_head(usuario.id, &usuario.display_name());
    print::as_tree_one_level(format::usuario_details(usuario, ctx.user_type));
    if cfg.quiet == 0 {
        print::print_status(format!("Lands on {}", ctx.home().as_str().color(colors::ACCENT)));
    }
    Ok(())
}

pub fn servidor(url: &str) -> anyhow::Result<()> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!("expected an http(s) URL, got '{url}'");
    }

    let path = ClientConfig::default_path();
    let mut file = ClientConfig::load(&path)?;
    file.server = url.to_string();
    file.save(&path)
        .with_context(|| format!("cannot write {}", path.display()))?;

    success!("Server set to {}", url.color(colors::PRIMARY));
    Ok(())
}
