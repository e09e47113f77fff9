//! Demo command - post a week of sample todos and print them back.

use anyhow::Result;
use clap::Args;
use std::fmt::Write;
use std::path::PathBuf;
use todos_client::TodoClient;
use todos_server::{Day, ServerConfig, TaskList, Todo, TodoServer};

/// The sample week, in posting order.
const POSTS: &[(Day, &str)] = &[
    (Day::Mon, "milk cows"),
    (Day::Mon, "feed cows"),
    (Day::Mon, "wash cows"),
    (Day::Tue, "wash laundry"),
    (Day::Tue, "fold laundry"),
    (Day::Tue, "iron laundry"),
    (Day::Wed, "flip burgers"),
    (Day::Thu, "join army"),
    (Day::Fri, "kill time"),
    (Day::Sat, "have beer"),
    (Day::Sat, "make merry"),
    (Day::Sun, "take aspirin"),
    (Day::Sun, "pray quietly"),
];

#[derive(Args)]
pub struct DemoCommand {
    /// Scratch database file, removed afterwards
    #[arg(long = "db", value_name = "PATH", default_value = "todos-demo.redb")]
    pub db: PathBuf,
}

impl DemoCommand {
    pub async fn run(&self) -> Result<()> {
        let server = TodoServer::start(ServerConfig {
            db_path: self.db.clone(),
            ..ServerConfig::default()
        })
        .await?;

        let result = exercise(&server.url()).await;

        server.close()?;
        server.closed().await;
        drop(server);
        if self.db.exists() {
            std::fs::remove_file(&self.db)?;
        }

        print!("{}", result?);
        Ok(())
    }
}

/// Post the sample week to the server at `url` and return the report.
async fn exercise(url: &str) -> Result<String> {
    let client = TodoClient::new(url);

    for (day, task) in POSTS {
        let mut todo = Todo::new(*day, *task);
        if let Err(e) = client.post(&mut todo).await {
            eprintln!("client post error: {}", e);
        }
    }

    report(&client).await
}

/// Each day's tasks, then the weekday and weekend lists.
async fn report(client: &TodoClient) -> Result<String> {
    let mut out = String::from("daily tasks ...\n");
    for day in Day::ALL {
        let tasks = client.day_tasks(day).await?;
        writeln!(out, "  {}: {}", day, joined(&tasks))?;
    }

    let weekdays = client.weekday_tasks().await?;
    writeln!(out, "\nweekday tasks: {}", joined(&weekdays))?;

    let weekend = client.weekend_tasks().await?;
    writeln!(out, "\nweekend tasks: {}", joined(&weekend))?;

    Ok(out)
}

fn joined(list: &TaskList) -> String {
    list.tasks.join(", ")
}
