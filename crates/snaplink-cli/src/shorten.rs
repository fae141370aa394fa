use std::io::Write;

use snaplink_core::validate_target_url;

use crate::cli::{parse_flags, print_shorten_help, resolve_globals, CliError, Deps};
use crate::clipboard::{copy_to_clipboard, Notice};
use crate::color::{color_func, URL};
use crate::password::write_error;

pub fn run_shorten(args: &[String], deps: &mut Deps) -> i32 {
    let mut pa = match parse_flags(args) {
        Ok(pa) => pa,
        Err(CliError::ShowHelp) => {
            print_shorten_help(deps);
            return 0;
        }
        Err(CliError::Error(e)) => {
            write_error(&mut deps.stderr, false, (deps.is_tty)(), &e);
            return 2;
        }
    };
    resolve_globals(&mut pa, deps);
    let is_tty = (deps.is_tty)();

    let target = match pa.args.as_slice() {
        [one] => one.clone(),
        [] => {
            write_error(&mut deps.stderr, pa.json, is_tty, "URL is required");
            return 2;
        }
        _ => {
            write_error(&mut deps.stderr, pa.json, is_tty, "expected a single URL");
            return 2;
        }
    };

    let target = match validate_target_url(&target) {
        Ok(url) => url,
        Err(e) => {
            write_error(&mut deps.stderr, pa.json, is_tty, &e.to_string());
            return 2;
        }
    };

    let client = (deps.make_api)(&pa.api_url, pa.timeout);
    let link = match client.shorten(target.as_str()) {
        Ok(link) => link,
        Err(e) => {
            write_error(&mut deps.stderr, pa.json, is_tty, &e);
            return 1;
        }
    };

    if pa.json {
        let out = serde_json::json!({ "url": link, "target": target.as_str() });
        let _ = writeln!(deps.stdout, "{}", out);
    } else if (deps.is_stdout_tty)() {
        let c = color_func(true);
        let _ = writeln!(deps.stdout, "{}", c(URL, &link));
    } else {
        let _ = writeln!(deps.stdout, "{}", link);
    }

    if pa.copy {
        let notice = (!pa.silent)
            .then(|| Notice::info("Your short link created and copied to clipboard", Some(&link)));
        copy_to_clipboard(deps, &link, notice);
    }

    if pa.qr && !pa.json && is_tty {
        crate::qr::write_qr(&mut deps.stderr, &link);
    }

    0
}
