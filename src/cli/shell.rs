use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{Res, info, types::Playlist, warning};

use super::{App, run};

const HELP: &str = "\
login                 sign in with Spotify
logout                sign out
whoami                show the signed-in profile
picks <lastfm-user>   underground picks from your Last.fm history
related <artist>      underground artists related to an artist
gems <artist>         hidden gems from your favorite artist
playlists             list your playlists
select <n>            choose the playlist used by `recommend`
recommend             underground tracks inspired by the selected playlist
status                show the last message
help                  show this help
quit                  leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Login,
    Logout,
    Whoami,
    Picks(String),
    Related(String),
    Gems(String),
    Playlists,
    Select(usize),
    Recommend,
    Status,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Parses one line of shell input. Arguments keep their inner spaces so
/// artist names like "Boards of Canada" need no quoting.
pub fn parse_line(line: &str) -> ShellCommand {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "login" | "signin" => ShellCommand::Login,
        "logout" | "signout" => ShellCommand::Logout,
        "whoami" => ShellCommand::Whoami,
        "picks" => ShellCommand::Picks(rest.to_string()),
        "related" => ShellCommand::Related(rest.to_string()),
        "gems" => ShellCommand::Gems(rest.to_string()),
        "playlists" => ShellCommand::Playlists,
        "select" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => ShellCommand::Select(n),
            _ => ShellCommand::Unknown(line.to_string()),
        },
        "recommend" => ShellCommand::Recommend,
        "status" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        _ => ShellCommand::Unknown(line.to_string()),
    }
}

#[derive(Debug, Default)]
struct ShellState {
    playlists: Vec<Playlist>,
    selected: Option<usize>,
}

impl ShellState {
    fn selected_id(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.playlists.get(i))
            .map(|p| p.id.as_str())
    }

    fn replace_playlists(&mut self, playlists: Vec<Playlist>) {
        self.selected = if playlists.is_empty() { None } else { Some(0) };
        self.playlists = playlists;
    }
}

/// Interactive loop sharing one session across commands until `quit` or end
/// of input.
pub async fn shell(app: &App) -> Res<()> {
    info!("Undergroundcli shell. Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut state = ShellState::default();

    loop {
        print!("underground> ");
        let _ = std::io::stdout().flush();

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_line(&line) {
            ShellCommand::Empty => {}
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::Status => match app.status.current() {
                Some(message) => warning!("{}", message),
                None => info!("No outstanding messages."),
            },
            ShellCommand::Login => {
                if run(app, super::sign_in(app)).await && app.session.is_signed_in().await {
                    if let Some(playlists) = preload_playlists(app).await {
                        state.replace_playlists(playlists);
                    }
                }
            }
            ShellCommand::Logout => {
                run(app, super::sign_out(app)).await;
                state = ShellState::default();
            }
            ShellCommand::Whoami => {
                run(app, super::whoami(app)).await;
            }
            ShellCommand::Picks(user) => {
                run(app, super::picks(app, &user)).await;
            }
            ShellCommand::Related(query) => {
                run(app, super::related(app, &query)).await;
            }
            ShellCommand::Gems(artist) => {
                run(app, super::gems(app, &artist)).await;
            }
            ShellCommand::Playlists => {
                let mut loaded = None;
                run(app, async {
                    loaded = Some(super::playlists(app).await?);
                    Ok::<(), crate::error::Error>(())
                })
                .await;
                if let Some(playlists) = loaded {
                    state.replace_playlists(playlists);
                }
            }
            ShellCommand::Select(n) => match state.playlists.get(n - 1) {
                Some(playlist) => {
                    info!("Selected {}", playlist.name);
                    state.selected = Some(n - 1);
                }
                None => warning!("Select one of your playlists first. Run `playlists` to list them."),
            },
            ShellCommand::Recommend => match state.selected_id() {
                Some(id) => {
                    run(app, super::recommend(app, Some(id))).await;
                }
                None => warning!("Select one of your playlists first."),
            },
            ShellCommand::Unknown(input) => warning!("Unknown command: {}. Type `help`.", input),
        }
    }

    Ok(())
}

/// Loads the user's playlists after sign-in so `select` and `recommend` work
/// right away. A failure is reported and left on the status line; the
/// session itself stays signed in.
pub async fn preload_playlists(app: &App) -> Option<Vec<Playlist>> {
    let mut loaded = None;
    run(app, async {
        let token = app.token().await?;
        let playlists = crate::spotify::playlists::get_user_playlists(&app.spotify, &token).await?;
        info!("Loaded {} playlists.", playlists.len());
        loaded = Some(playlists);
        Ok::<(), crate::error::Error>(())
    })
    .await;
    loaded
}
