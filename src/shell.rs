use crate::conversations::MessageKind;
use crate::feed::{Direction, MatchFilters};
use crate::location::Locator;
use crate::plan::Payer;
use crate::profile::Language;
use crate::session::{Session, View};
use crate::suggestions::{PlanOrigin, SuggestionEvent};
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const HELP: &str = "Commands:\n\
                    \x20 n / p            next / previous candidate\n\
                    \x20 like | pass      like (needs a date plan) or skip\n\
                    \x20 chat             open the chat after a match\n\
                    \x20 say <text>       send a message in the open chat\n\
                    \x20 img <url>        send a photo in the open chat\n\
                    \x20 plan             ask for a new date plan in the open chat\n\
                    \x20 time <when>      change the time of the chat's date plan\n\
                    \x20 pay <0-100>|random  move the who-pays slider\n\
                    \x20 inbox            list new matches and chats\n\
                    \x20 open <id>        open a chat from the inbox\n\
                    \x20 filter age <min> <max> | distance <km> | category <name|all> | reset\n\
                    \x20 lang <vi|en>     switch language\n\
                    \x20 interest add|rm <name>, bio <text>, job <text>  edit your profile\n\
                    \x20 topics           community discussion topics\n\
                    \x20 location         retry location access\n\
                    \x20 back | show | help | quit";

const FILTER_USAGE: &str =
    "Usage: filter age <min> <max> | distance <km> | category <name|all> | reset";

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Next,
    Prev,
    Like,
    Pass,
    Chat,
    Say(String),
    Image(String),
    Plan,
    Time(String),
    Pay(Option<u8>),
    Inbox,
    Open(String),
    Filter(MatchFilters),
    Lang(Language),
    AddInterest(String),
    RemoveInterest(String),
    Bio(String),
    Job(String),
    Topics,
    Location,
    Back,
    Show,
    Help,
    Quit,
}

fn parse_filter(args: &[&str], current: &MatchFilters) -> Result<MatchFilters, String> {
    let mut filters = current.clone();
    match args {
        ["age", min, max] => {
            let min: u32 = min.parse().map_err(|_| format!("Invalid age: {}", min))?;
            let max: u32 = max.parse().map_err(|_| format!("Invalid age: {}", max))?;
            if min > max {
                return Err("Minimum age is above maximum".to_string());
            }
            filters.min_age = min;
            filters.max_age = max;
        }
        ["distance", km] => {
            filters.max_distance_km = km
                .parse()
                .map_err(|_| format!("Invalid distance: {}", km))?;
        }
        ["category", "all"] => filters.category = None,
        ["category", name] => filters.category = Some(name.to_string()),
        ["reset"] => filters = MatchFilters::default(),
        _ => return Err(FILTER_USAGE.to_string()),
    }
    Ok(filters)
}

fn parse_command(line: &str, filters: &MatchFilters) -> Result<Command, String> {
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map(|(h, r)| (h, r.trim()))
        .unwrap_or((line, ""));

    match head {
        "n" | "next" => Ok(Command::Next),
        "p" | "prev" => Ok(Command::Prev),
        "like" => Ok(Command::Like),
        "pass" => Ok(Command::Pass),
        "chat" => Ok(Command::Chat),
        "say" if !rest.is_empty() => Ok(Command::Say(rest.to_string())),
        "img" if !rest.is_empty() => Ok(Command::Image(rest.to_string())),
        "plan" => Ok(Command::Plan),
        "time" if !rest.is_empty() => Ok(Command::Time(rest.to_string())),
        "pay" => match rest {
            "random" => Ok(Command::Pay(None)),
            value => value
                .parse::<u8>()
                .ok()
                .filter(|v| *v <= 100)
                .map(|v| Command::Pay(Some(v)))
                .ok_or_else(|| "Usage: pay <0-100>|random".to_string()),
        },
        "inbox" => Ok(Command::Inbox),
        "open" if !rest.is_empty() => Ok(Command::Open(rest.to_string())),
        "filter" => {
            let args: Vec<&str> = rest.split_whitespace().collect();
            parse_filter(&args, filters).map(Command::Filter)
        }
        "lang" => match rest {
            "vi" => Ok(Command::Lang(Language::Vi)),
            "en" => Ok(Command::Lang(Language::En)),
            _ => Err("Usage: lang <vi|en>".to_string()),
        },
        "interest" => match rest.split_once(char::is_whitespace) {
            Some(("add", name)) => Ok(Command::AddInterest(name.trim().to_string())),
            Some(("rm", name)) => Ok(Command::RemoveInterest(name.trim().to_string())),
            _ => Err("Usage: interest add|rm <name>".to_string()),
        },
        "bio" => Ok(Command::Bio(rest.to_string())),
        "job" => Ok(Command::Job(rest.to_string())),
        "topics" => Ok(Command::Topics),
        "location" => Ok(Command::Location),
        "back" => Ok(Command::Back),
        "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => Err(format!("Unknown command: {} (try `help`)", line)),
    }
}

pub struct Shell {
    session: Session,
    locator: Box<dyn Locator>,
    location_granted: bool,
}

impl Shell {
    pub fn new(session: Session, locator: Box<dyn Locator>) -> Self {
        Self {
            session,
            locator,
            location_granted: false,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        self.request_location().await;
        println!("{}", HELP);

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if !self.handle_line(line).await {
                        break;
                    }
                }
                Some(event) = self.session.next_suggestion() => {
                    self.on_suggestion(&event);
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        info!("Session ended");
        Ok(())
    }

    async fn request_location(&mut self) {
        match self.session.request_location(self.locator.as_ref()).await {
            Ok(_) => {
                self.location_granted = true;
                println!("{}", self.session.user().format_summary());
                self.print_feed();
            }
            Err(e) => {
                warn!("Location request failed: {}", e);
                println!(
                    "Location access is required for date plans. Enable it and type `location` to retry."
                );
            }
        }
    }

    /// Returns false when the session should end.
    async fn handle_line(&mut self, line: &str) -> bool {
        let command = match parse_command(line, self.session.filters()) {
            Ok(c) => c,
            Err(msg) => {
                println!("{}", msg);
                return true;
            }
        };

        if !self.location_granted
            && !matches!(command, Command::Location | Command::Help | Command::Quit)
        {
            println!("Location access is required first. Type `location` to retry.");
            return true;
        }

        match command {
            Command::Next => {
                self.session.advance(Direction::Forward);
                self.print_feed();
            }
            Command::Prev => {
                self.session.advance(Direction::Backward);
                self.print_feed();
            }
            Command::Pass => {
                self.session.pass();
                self.print_feed();
            }
            Command::Like => {
                if self.session.like_current().is_none() {
                    println!("Wait for the date plan before liking.");
                    return true;
                }
                let name = self
                    .session
                    .current_candidate()
                    .map(|c| c.profile.first_name())
                    .unwrap_or_default();
                println!("It's a match with {}! Type `chat` to start talking.", name);
            }
            Command::Chat => {
                if self.session.enter_chat() {
                    self.print_chat();
                } else {
                    println!("Like someone first, or use `open <id>` from the inbox.");
                }
            }
            Command::Say(text) => self.send(&text, MessageKind::Text),
            Command::Image(url) => self.send(&url, MessageKind::Image),
            Command::Plan => {
                println!("Looking for a new place...");
                match self.session.suggest_new_plan().await {
                    Some(_) => self.print_chat(),
                    None => println!("Open a chat first."),
                }
            }
            Command::Time(time) => match self.session.change_plan_time(&time) {
                Some(plan) => println!("Date plan:\n{}", plan.format_summary()),
                None => println!("Open a chat with a date plan first."),
            },
            Command::Pay(value) => {
                let moved = match value {
                    Some(v) => self.session.set_payer_slider(v),
                    None => self.session.randomize_payer(),
                };
                match moved {
                    Some(v) => println!("Payer: {} ({}/100)", Payer::from_slider(v), v),
                    None => println!("Open a chat first."),
                }
            }
            Command::Inbox => self.print_inbox(),
            Command::Open(id) => {
                if self.session.open_chat(&id).is_some() {
                    self.print_chat();
                } else {
                    println!("No candidate with id {}", id);
                }
            }
            Command::Filter(filters) => {
                self.session.set_filters(filters);
                self.print_feed();
            }
            Command::Lang(language) => {
                self.session.set_language(language);
                println!("Language set to {}", language.tag());
            }
            Command::AddInterest(name) => {
                if !self.session.add_interest(&name) {
                    println!("{} is already in your interests.", name);
                }
                println!("{}", self.session.user().format_summary());
            }
            Command::RemoveInterest(name) => {
                if !self.session.remove_interest(&name) {
                    println!("{} is not one of your interests.", name);
                }
                println!("{}", self.session.user().format_summary());
            }
            Command::Bio(text) => {
                self.session.update_info(Some(&text), None);
                println!("{}", self.session.user().format_summary());
            }
            Command::Job(text) => {
                self.session.update_info(None, Some(&text));
                println!("{}", self.session.user().format_summary());
            }
            Command::Topics => {
                let topics = self.session.community_topics().await;
                if topics.is_empty() {
                    println!("No community topics right now.");
                }
                for topic in &topics {
                    println!("  {}", topic.format_line());
                }
            }
            Command::Location => self.request_location().await,
            Command::Back => {
                self.session.back();
                self.print_feed();
            }
            Command::Show => match self.session.view() {
                View::Chat(_) => self.print_chat(),
                _ => self.print_feed(),
            },
            Command::Help => println!("{}", HELP),
            Command::Quit => return false,
        }
        true
    }

    fn send(&mut self, text: &str, kind: MessageKind) {
        if self.session.send(text, kind).is_some() {
            self.print_chat();
        } else {
            println!("Open a chat first.");
        }
    }

    fn on_suggestion(&self, event: &SuggestionEvent) {
        let on_screen = *self.session.view() == View::Feed
            && self
                .session
                .current_candidate()
                .is_some_and(|c| c.id() == event.candidate_id);
        if on_screen {
            let note = match event.origin {
                PlanOrigin::Generated => "",
                PlanOrigin::Fallback => " (fallback)",
            };
            println!("Date plan{}:\n{}", note, event.plan.format_summary());
        }
    }

    fn print_feed(&self) {
        let Some(candidate) = self.session.current_candidate() else {
            println!("No candidates match your filters.");
            return;
        };
        if let Some((position, total)) = self.session.feed_position() {
            println!("\n[{}/{}]", position, total);
        }
        println!("{}", candidate.format_card());
        match self.session.suggestion() {
            Some(plan) => {
                let note = match self.session.cache().origin(candidate.id()) {
                    Some(PlanOrigin::Fallback) => " (fallback)",
                    _ => "",
                };
                println!("Date plan{}:\n{}", note, plan.format_summary());
            }
            None if self.session.is_analyzing() => println!("Analyzing a date plan..."),
            None => {}
        }
    }

    fn print_chat(&self) {
        if let Some(view) = self.session.chat_view() {
            println!("\n{}", view);
        }
    }

    fn print_inbox(&self) {
        let inbox = self.session.inbox();
        println!("New matches ({}):", inbox.new_matches.len());
        for c in &inbox.new_matches {
            println!("  {} [{}]", c.profile.first_name(), c.id());
        }
        println!("Messages:");
        if inbox.active_chats.is_empty() {
            println!("  Start chatting with your matches!");
        }
        for (c, conversation) in &inbox.active_chats {
            let last = conversation
                .last_message()
                .map(|m| m.text.as_str())
                .unwrap_or_default();
            let unread = if conversation.unread_count > 0 {
                format!(" ({} new)", conversation.unread_count)
            } else {
                String::new()
            };
            println!("  {} [{}]{}: {}", c.profile.name, c.id(), unread, last);
        }
    }
}
