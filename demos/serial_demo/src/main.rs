mod console;
mod line;

use catcher_config::*;
use catcher_core::{CommandCatcher, Delimiters};
use catcher_macros::define_routes;
use usercode::handlers as uc;
use usercode::listeners::{Tracer, trace_record};

use console::ConsoleDiagnostics;
use line::SimulatedLine;

define_routes! {
    mod routes;
    message_size = catcher_config::MESSAGE_SIZE;
    path = "../usercode/src/routes.cfg"
}

type Catcher<'a> =
    CommandCatcher<'a, SimulatedLine, { RECORD_STORAGE }, { MAX_LISTENERS }, ConsoleDiagnostics>;

const SCRIPT: &[u8] = b"\n  ping\nled on\nset speed=12\nget speed\n\
this-command-is-far-too-long-for-the-buffer\nstatus\nbogus 1\n";

/// Reports commands the router does not know about.
fn reject_unknown(command: &str, param: &str) {
    if !routes::is_supported_command(command) {
        if let Err(e) = routes::dispatch(command, param) {
            println!("❌ {} (try: {})", e, routes::get_commands());
        }
    }
}

fn main() {
    let tracer = Tracer::new();

    let mut catcher = Catcher::with_diagnostics(ConsoleDiagnostics::default());
    catcher.add_function(trace_record);
    catcher.add_listener(&tracer);
    catcher.add_function(routes::notify);
    catcher.add_function(reject_unknown);

    if catcher
        .setup(SimulatedLine::new(SCRIPT, LINE_BURST), RECORD_CAPACITY, MAX_LISTENERS)
        .is_err()
    {
        return;
    }
    catcher.set_delimiters(Delimiters::new(SEPARATOR, TERMINATOR));

    println!("Routes ({}): {}", routes::NUM_ROUTES, routes::get_commands());

    loop {
        let Some(line) = catcher.source_mut() else {
            break;
        };
        if line.is_drained() {
            break;
        }
        line.tick();
        catcher.poll(true);
    }

    println!(
        "❗Done: {} records traced, {} overruns",
        tracer.seen(),
        catcher.diagnostics().overruns
    );
}

// ==================== TESTS =======================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_table() {
        assert_eq!(routes::NUM_ROUTES, 5);
        assert!(routes::is_supported_command("led"));
        assert!(routes::is_supported_command("status"));
        assert!(!routes::is_supported_command("LED"));
        assert_eq!(routes::get_commands(), "set | get | led | ping | status");
    }

    #[test]
    fn test_router_dispatch() {
        assert!(routes::dispatch("ping", "").is_ok());
        let err = routes::dispatch("bogus", "1").unwrap_err();
        assert_eq!(err.as_str(), "Unknown command: bogus");
    }

    #[test]
    fn test_script_is_fully_consumed() {
        let tracer = Tracer::new();
        let mut catcher = Catcher::with_diagnostics(ConsoleDiagnostics::default());
        catcher.add_listener(&tracer);
        catcher
            .setup(SimulatedLine::new(SCRIPT, LINE_BURST), RECORD_CAPACITY, MAX_LISTENERS)
            .unwrap();

        while let Some(line) = catcher.source_mut() {
            if line.is_drained() {
                break;
            }
            line.tick();
            catcher.poll(true);
        }

        // ping, led, set, get, truncated record, status, bogus
        assert_eq!(tracer.seen(), 7);
        assert_eq!(catcher.diagnostics().overruns, 1);
    }
}
