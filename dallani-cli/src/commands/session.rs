use crate::context::Context;
use crate::storage::token_path;
use anyhow::{Context as _, Result, anyhow};
use rpassword::prompt_password;
use std::io::{self, BufRead, Write};

/// Signs in and stores the access token.
///
/// # Arguments
/// * `email` - Admin email; prompted when `None`
/// * `password_stdin` - Read the password from stdin instead of the terminal
///
/// # Errors
/// Returns the localized failure of the login call, or an input error.
pub async fn login(ctx: &Context, email: Option<String>, password_stdin: bool) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => prompt("البريد الإلكتروني: ")?,
    };
    let password = if password_stdin {
        read_stdin_line()?
    } else {
        prompt_password("كلمة المرور: ").context("failed to read password")?
    };

    let success = ctx
        .client
        .login(&email, &password)
        .await
        .map_err(|err| anyhow!(err.user_message()))?;

    let name = success
        .user
        .as_ref()
        .map(|user| user.display_name().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or(email);
    println!("مرحباً {name}، تم تسجيل الدخول بنجاح");
    println!("Session stored at {}", token_path().display());
    Ok(())
}

/// Drops the stored token. Repeating it is harmless.
pub fn logout(ctx: &Context) {
    ctx.client.logout();
    println!("تم تسجيل الخروج");
}

pub fn whoami(ctx: &Context) {
    if ctx.client.session().is_authenticated() {
        println!("مسجل الدخول إلى {}", ctx.client.base_url());
    } else {
        println!("غير مسجل الدخول");
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().ok();
    read_stdin_line()
}

/// One line of stdin, trimmed. Blank input is left to the login validation.
fn read_stdin_line() -> Result<String> {
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
