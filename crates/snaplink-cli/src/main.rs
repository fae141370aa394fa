use std::io::{self, Write};

use snaplink_cli::cli;
use snaplink_cli::client::ApiClient;
use snaplink_cli::logging;

fn main() {
    let mut deps = cli::Deps {
        stdin: Box::new(io::stdin()),
        stdout: Box::new(io::stdout()),
        stderr: Box::new(io::stderr()),
        is_tty: Box::new(|| is_terminal::is_terminal(io::stdin())),
        is_stdout_tty: Box::new(|| is_terminal::is_terminal(io::stdout())),
        getenv: Box::new(|key: &str| std::env::var(key).ok()),
        init_logging: Box::new(logging::init_logging),
        make_api: Box::new(|api_url: &str, timeout: std::time::Duration| {
            Box::new(ApiClient::new(api_url, timeout))
        }),
        read_pass: Box::new(|prompt: &str, w: &mut dyn Write| {
            w.write_all(prompt.as_bytes())?;
            w.flush()?;
            rpassword::read_password()
        }),
        copy_to_clipboard: Box::new(|text: &str| {
            use std::process::{Command, Stdio};

            #[cfg(target_os = "macos")]
            let mut child = Command::new("pbcopy")
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .map_err(|e| e.to_string())?;

            #[cfg(target_os = "linux")]
            let mut child = Command::new("xclip")
                .args(["-selection", "clipboard"])
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .or_else(|_| {
                    Command::new("xsel")
                        .args(["--clipboard", "--input"])
                        .stdin(Stdio::piped())
                        .stdout(Stdio::null())
                        .stderr(Stdio::null())
                        .spawn()
                })
                .map_err(|e| e.to_string())?;

            #[cfg(target_os = "windows")]
            let mut child = Command::new("clip.exe")
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .map_err(|e| e.to_string())?;

            #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
            return Err(format!("clipboard not supported on this platform ({} bytes)", text.len()));

            #[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
            {
                if let Some(ref mut stdin) = child.stdin {
                    stdin
                        .write_all(text.as_bytes())
                        .map_err(|e| e.to_string())?;
                }
                // Close the pipe so the tool sees EOF.
                child.stdin.take();
                let status = child.wait().map_err(|e| e.to_string())?;
                if status.success() {
                    Ok(())
                } else {
                    Err(format!("clipboard command exited with {}", status))
                }
            }
        }),
    };

    let args: Vec<String> = std::env::args().collect();
    let code = cli::run(&args, &mut deps);
    std::process::exit(code);
}
