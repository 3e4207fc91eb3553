use gufo::cli::parse_args;
use gufo::cli_output::{print_header, print_step, status_err, status_ok};
use gufo::client::GufoClient;
use gufo::config::GufoConfig;
use gufo::models::{ChatRequest, RatingRequest};
use gufo::sink::StdoutSink;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    let args = parse_args(std::env::args());
    if args.version {
        println!("gufo {}", VERSION);
        return;
    }

    // Logs go to stderr so they never interleave with streamed stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = args.apply(GufoConfig::from_env());
    let code = run_demo(&config).await;
    std::process::exit(code);
}

/// Run the sequential demo. Returns the process exit code: 0 when the
/// chat request succeeded, 1 when it failed. Later steps report their
/// own failures but never change the exit code; steps whose prerequisite
/// result is absent are skipped.
async fn run_demo(config: &GufoConfig) -> i32 {
    let client = match GufoClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            status_err(&format!("failed to build HTTP client: {}", e));
            return 1;
        }
    };

    print_header("GUFORAG CHAT API DEMO");

    // 1. Streaming chat. Creates a new room (null ids).
    print_step(1, "CHAT (STREAMED RESPONSE)");
    println!("user: {}", config.question);
    println!("assistant:");
    let request = ChatRequest::new(&config.question, &config.config_name)
        .with_user(config.user_id.clone());
    let mut sink = StdoutSink::new();
    let outcome = match client.chat(&request, &mut sink).await {
        Ok(outcome) => {
            println!(
                "full response length: {} characters",
                outcome.transcript_len()
            );
            Some(outcome)
        }
        Err(e) => {
            status_err(&format!("chat request failed: {}", e));
            None
        }
    };
    let chat_room_id = outcome.as_ref().and_then(|o| o.chat_room_id());

    // 2. Chat room list.
    print_step(2, "CHAT ROOM LIST");
    match client.chat_rooms().await {
        Ok(rooms) => {
            status_ok(&format!("found {} chat rooms", rooms.len()));
            for room in &rooms {
                println!(
                    "  - id: {}, title: {}, role: {}, model: {}, logs: {}",
                    room.id, room.title, room.role, room.model_name, room.chat_logs_count
                );
            }
        }
        Err(e) => status_err(&format!("chat room list failed: {}", e)),
    }

    // 3. Chat logs of the room created in step 1.
    if let Some(room_id) = chat_room_id {
        print_step(3, &format!("CHAT LOGS (ROOM {})", room_id));
        match client.chat_logs(room_id).await {
            Ok(logs) => {
                status_ok(&format!("found {} chat logs", logs.len()));
                for log in &logs {
                    println!("  - log id: {}", log.id);
                    println!("    user: {}", log.human_content);
                    println!("    assistant: {}", log.ai_preview(50));
                    println!("    time: {}", log.human_time.format("%Y-%m-%d %H:%M:%S"));
                    if let Some(questions) = &log.suggest_questions {
                        if !questions.is_empty() {
                            println!("    suggested: {}", questions.join(", "));
                        }
                    }
                }
            }
            Err(e) => status_err(&format!("chat log list failed: {}", e)),
        }
    }

    // 4 + 5. Rate the first chat log and read the rating back.
    if let Some(room_id) = chat_room_id {
        if let Some(log_id) = client.first_chat_log_id(room_id).await {
            print_step(4, &format!("RATE CHAT LOG {}", log_id));
            let rating = RatingRequest::positive("This answer was helpful!");
            match client.rate_chat_log(log_id, &rating).await {
                Ok(message) => status_ok(&format!("rating submitted: {}", message)),
                Err(e) => status_err(&format!("rating submission failed: {}", e)),
            }

            print_step(5, &format!("FETCH RATING (LOG {})", log_id));
            match client.chat_log_rating(log_id).await {
                Ok(rating) => {
                    status_ok("rating info:");
                    println!("  - type: {}", rating.rating_type.as_deref().unwrap_or("-"));
                    println!(
                        "  - feedback: {}",
                        rating.rating_feedback.as_deref().unwrap_or("-")
                    );
                    println!("  - time: {}", rating.rating_time.as_deref().unwrap_or("-"));
                    println!("  - has rating: {}", rating.has_rating);
                }
                Err(e) => status_err(&format!("rating lookup failed: {}", e)),
            }
        }
    }

    println!();
    if outcome.is_some() {
        0
    } else {
        1
    }
}
