//! Offline wellness chatbot
//!
//! Terminal fallback that needs no API key: replies are picked at random
//! from canned responses for the first keyword category the input matches.

use chrono::{DateTime, Local};
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::{self, Write};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

const TYPING_DELAY: Duration = Duration::from_secs(1);
const CLEARED_REPLY: &str = "Conversation cleared. How can I help you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Greeting,
    Anxiety,
    Stress,
    Sad,
    Sleep,
    Study,
    Help,
    Default,
}

impl Category {
    /// Categories in match priority order
    const MATCH_ORDER: [Category; 7] = [
        Category::Greeting,
        Category::Anxiety,
        Category::Stress,
        Category::Sad,
        Category::Sleep,
        Category::Study,
        Category::Help,
    ];

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Greeting => &["hello", "hi", "hey", "good morning", "good afternoon"],
            Category::Anxiety => &["anxious", "anxiety", "worried", "nervous"],
            Category::Stress => &["stressed", "stress", "overwhelmed", "pressure"],
            Category::Sad => &["sad", "depressed", "down", "hopeless", "blue"],
            Category::Sleep => &["sleep", "insomnia", "tired", "exhausted"],
            Category::Study => &["study", "studying", "exam", "academic", "grades"],
            Category::Help => &["help", "support", "assistance"],
            Category::Default => &[],
        }
    }

    fn responses(self) -> &'static [&'static str] {
        match self {
            Category::Greeting => &[
                "Hello! I'm your AI wellness assistant. How can I help you today?",
                "Hi there! I'm here to support your mental wellness. What's on your mind?",
                "Welcome! I'm ready to help you with any concerns or questions you have.",
            ],
            Category::Anxiety => &[
                "I understand you're feeling anxious. This is completely normal, especially for students. Would you like to try some breathing exercises or relaxation techniques?",
                "Anxiety can be overwhelming, but remember that these feelings are temporary. Let's work through some coping strategies together.",
                "It's okay to feel anxious. I'm here to help you find ways to manage these feelings. What specific situation is causing you stress?",
            ],
            Category::Stress => &[
                "Stress is a common experience, especially during academic life. Let's explore some stress management techniques that might help.",
                "I hear that you're feeling stressed. Remember to take breaks and practice self-care. What's been particularly challenging lately?",
                "Stress can affect both your mental and physical health. Let's work on some strategies to help you feel more balanced.",
            ],
            Category::Sad => &[
                "I'm sorry to hear you're feeling sad. It's important to acknowledge these feelings and know that you're not alone.",
                "Feeling sad is a valid emotion. Sometimes talking about what's bothering us can help. Would you like to share more?",
                "It's okay to feel down sometimes. Remember that these feelings are temporary and there are people who care about you.",
            ],
            Category::Sleep => &[
                "Sleep issues can really impact your mental health. Let's explore some strategies to improve your sleep quality.",
                "Poor sleep can make everything feel more difficult. I can help you with some relaxation techniques before bedtime.",
                "Sleep is crucial for your wellbeing. What's been keeping you up at night? Let's work on some solutions together.",
            ],
            Category::Study => &[
                "Academic pressure is very common among students. Let's discuss some study strategies and stress management techniques.",
                "Balancing studies with self-care is important. What specific academic challenges are you facing?",
                "It's normal to feel overwhelmed with studies. Let's work on some time management and study techniques that might help.",
            ],
            Category::Help => &[
                "I'm here to help! I can assist you with breathing exercises, stress management, study tips, or just listen to what's on your mind.",
                "I'm ready to support you in any way I can. What would be most helpful for you right now?",
                "I'm here to provide guidance and support. Whether it's anxiety, stress, sleep issues, or academic concerns, I'm ready to help.",
            ],
            Category::Default => &[
                "I understand you're going through something. I'm here to listen and help. Could you tell me more about what you're experiencing?",
                "I'm here to support you. Feel free to share what's on your mind, and we can work through it together.",
                "Thank you for sharing with me. I'm ready to help you with whatever you're facing. What would be most helpful right now?",
            ],
        }
    }

    /// First category with a keyword contained in the input, case-insensitively
    fn classify(input: &str) -> Category {
        let lower = input.to_lowercase();
        Self::MATCH_ORDER
            .into_iter()
            .find(|category| category.keywords().iter().any(|k| lower.contains(k)))
            .unwrap_or(Category::Default)
    }
}

#[derive(Debug, Clone)]
struct Exchange {
    user: String,
    bot: &'static str,
    timestamp: DateTime<Local>,
}

#[derive(Debug, Default)]
struct OfflineChatbot {
    history: Vec<Exchange>,
}

impl OfflineChatbot {
    fn respond(&mut self, input: &str, rng: &mut impl Rng) -> &'static str {
        let responses = Category::classify(input).responses();
        let reply = responses.choose(rng).copied().unwrap_or(responses[0]);

        self.history.push(Exchange {
            user: input.to_string(),
            bot: reply,
            timestamp: Local::now(),
        });
        reply
    }

    fn print_history(&self) {
        if self.history.is_empty() {
            println!("No messages yet.");
            return;
        }
        for exchange in &self.history {
            println!("[{}]", exchange.timestamp.format("%H:%M:%S"));
            println!("  You: {}", exchange.user);
            println!("  Assistant: {}", exchange.bot);
        }
    }

    fn clear(&mut self) -> &'static str {
        self.history.clear();
        CLEARED_REPLY
    }
}

enum Command<'a> {
    Quit,
    Clear,
    History,
    Skip,
    Message(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let input = line.trim();
    match input.to_lowercase().as_str() {
        "quit" | "exit" | "bye" => Command::Quit,
        "clear" => Command::Clear,
        "history" => Command::History,
        "" => Command::Skip,
        _ => Command::Message(input),
    }
}

/// Write a partial line and flush so it shows before the next read
fn write_flushed(out: &mut impl Write, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}

#[tokio::main]
async fn main() -> io::Result<()> {
    println!("Offline Wellness Assistant");
    println!("{}", "=".repeat(50));
    println!("Type 'quit' to exit, 'clear' to clear conversation, 'history' to review it");
    println!("{}", "=".repeat(50));

    let mut chatbot = OfflineChatbot::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        write_flushed(&mut io::stdout(), "\nYou: ")?;
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!("\n\nGoodbye! Take care!");
                break;
            }
        };
        let Some(line) = line else {
            println!();
            break;
        };

        match parse_command(&line) {
            Command::Quit => {
                println!("Thank you for chatting! Take care of yourself!");
                break;
            }
            Command::Clear => println!("Assistant: {}", chatbot.clear()),
            Command::History => chatbot.print_history(),
            Command::Skip => {}
            Command::Message(input) => {
                write_flushed(&mut io::stdout(), "Assistant: ")?;
                tokio::time::sleep(TYPING_DELAY).await;
                let reply = chatbot.respond(input, &mut rand::thread_rng());
                println!("{reply}");
            }
        }
    }

    Ok(())
}
