//! Integration tests for the scrape and download pipelines.
//!
//! A fake history source stands in for Discord and a mock HTTP server for
//! the CDN, so every command runs end to end against a temporary folder.

use cdnscrape::log_writer::channel_dir;
use cdnscrape::{Category, ChannelRef, Config, Message, MessageAmount, Pipeline};

use chrono::NaiveDate;
use std::fs;
use std::sync::Arc;
use wiremock::MockServer;

mod common;
use common::helpers::*;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
}

fn general() -> ChannelRef {
    ChannelRef::new(1, "general")
}

#[tokio::test]
async fn test_images_scenario() {
    let temp_dir = create_temp_dir();
    let history = FakeHistory::new().with_channel(
        1,
        vec![
            Message::text("see https://cdn.discordapp.com/x/a.png"),
            Message::attachment("https://cdn.discordapp.com/x/b.mp4"),
        ],
    );
    let pipeline = Pipeline::new(create_test_config(temp_dir.path()), history);

    let links = pipeline
        .collect_links(&general(), Category::Images, MessageAmount::All)
        .await
        .unwrap();

    assert_eq!(links, vec!["https://cdn.discordapp.com/x/a.png"]);
}

#[tokio::test]
async fn test_links_stay_in_chronological_order() {
    let temp_dir = create_temp_dir();
    let history = FakeHistory::new().with_channel(
        1,
        vec![
            Message::new(cdn_link("1.png"), vec![cdn_link("2.mp3")]),
            Message::text("no links here"),
            Message::new(
                format!("{} and {}", cdn_link("3.jpg"), cdn_link("avatars/4.png")),
                vec![cdn_link("5.mp4")],
            ),
        ],
    );
    let pipeline = Pipeline::new(create_test_config(temp_dir.path()), history);

    let links = pipeline
        .collect_links(&general(), Category::All, MessageAmount::All)
        .await
        .unwrap();

    assert_eq!(
        links,
        vec![cdn_link("1.png"), cdn_link("2.mp3"), cdn_link("3.jpg"), cdn_link("5.mp4")]
    );
}

#[tokio::test]
async fn test_message_amount_limits_to_most_recent() {
    let temp_dir = create_temp_dir();
    let history = FakeHistory::new().with_channel(
        1,
        vec![
            Message::attachment(cdn_link("old.png")),
            Message::attachment(cdn_link("mid.png")),
            Message::attachment(cdn_link("new.png")),
        ],
    );
    let pipeline = Pipeline::new(create_test_config(temp_dir.path()), history);

    let links = pipeline
        .collect_links(&general(), Category::Images, "2".parse().unwrap())
        .await
        .unwrap();

    assert_eq!(links, vec![cdn_link("mid.png"), cdn_link("new.png")]);
}

#[tokio::test]
async fn test_scrape_channel_writes_log() {
    let temp_dir = create_temp_dir();
    let config = create_test_config(temp_dir.path());
    let history = FakeHistory::new().with_channel(
        1,
        vec![
            Message::attachment(cdn_link("a.png")),
            Message::attachment(cdn_link("b.mp4")),
            Message::attachment(cdn_link("c.jpg")),
        ],
    );
    let pipeline = Pipeline::new(config.clone(), history);

    let report = pipeline
        .scrape_channel(TEST_GUILD, &general(), Category::Images, MessageAmount::All, date())
        .await
        .unwrap();

    let expected = channel_dir(&config.output_folder, TEST_GUILD, "general")
        .join("scrape_links_2024-05-17_images.txt");
    assert_eq!(report.logs.len(), 1);
    assert_eq!(report.logs[0].path, expected);
    assert_eq!(report.total_links(), 2);
    assert_eq!(
        fs::read_to_string(&expected).unwrap(),
        format!("\"{}\"\n\n\"{}\"", cdn_link("a.png"), cdn_link("c.jpg"))
    );
    assert!(report.message().ends_with("Total links found: 2"));
}

#[tokio::test]
async fn test_scrape_without_links_writes_nothing() {
    let temp_dir = create_temp_dir();
    let config = create_test_config(temp_dir.path());
    let history = FakeHistory::new().with_channel(1, vec![Message::text("hello there")]);
    let pipeline = Pipeline::new(config.clone(), history);

    let report = pipeline
        .scrape_channel(TEST_GUILD, &general(), Category::All, MessageAmount::All, date())
        .await
        .unwrap();

    assert!(report.logs.is_empty());
    assert_eq!(report.message(), "Scrape completed but no links were found.");
    assert!(!config.output_folder.exists());
}

#[tokio::test]
async fn test_scrape_channel_propagates_history_error() {
    let temp_dir = create_temp_dir();
    let history = FakeHistory::new().with_failing_channel(1);
    let pipeline = Pipeline::new(create_test_config(temp_dir.path()), history);

    let result = pipeline
        .scrape_channel(TEST_GUILD, &general(), Category::All, MessageAmount::All, date())
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_server_wide_scrape_skips_failing_channel() {
    let temp_dir = create_temp_dir();
    let config = create_test_config(temp_dir.path());
    let history = FakeHistory::new()
        .with_channel(1, vec![Message::attachment(cdn_link("a.png"))])
        .with_failing_channel(2)
        .with_channel(3, vec![Message::text("nothing")])
        .with_channel(4, vec![Message::attachment(cdn_link("b.gif")), Message::attachment(cdn_link("c.png"))]);
    let pipeline = Pipeline::new(config.clone(), history);
    let channels = vec![
        ChannelRef::new(1, "general"),
        ChannelRef::new(2, "locked"),
        ChannelRef::new(3, "chat"),
        ChannelRef::new(4, "art"),
    ];

    let report = pipeline
        .scrape_server(TEST_GUILD, &channels, Category::All, MessageAmount::All, date())
        .await;

    let channels_logged: Vec<&str> = report.logs.iter().map(|l| l.channel.as_str()).collect();
    assert_eq!(channels_logged, vec!["general", "art"]);
    assert_eq!(report.skipped, vec!["locked"]);
    assert_eq!(report.total_links(), 3);
    assert!(channel_dir(&config.output_folder, TEST_GUILD, "art")
        .join("scrape_links_2024-05-17.txt")
        .exists());
    assert!(!channel_dir(&config.output_folder, TEST_GUILD, "chat").exists());
}

#[tokio::test]
async fn test_download_channel_end_to_end() {
    let server = MockServer::start().await;
    mount_file(&server, "/att/1/pic.jpg", b"one").await;
    mount_file(&server, "/att/2/pic.jpg", b"two").await;
    mount_file(&server, "/att/3/clip.mp4", b"three").await;
    mount_status(&server, "/att/4/gone.png", 404).await;

    let temp_dir = create_temp_dir();
    let config = Arc::new(Config {
        cdn_host: "127.0.0.1".into(),
        ..(*create_test_config(temp_dir.path())).clone()
    });
    let link = |p: &str| format!("{}{}", server.uri(), p);
    let history = FakeHistory::new().with_channel(
        1,
        vec![
            Message::text(format!("first {}", link("/att/1/pic.jpg"))),
            Message::new(link("/att/3/clip.mp4"), vec![link("/att/2/pic.jpg")]),
            Message::attachment(link("/att/4/gone.png")),
        ],
    );
    let pipeline = Pipeline::new(config.clone(), history);

    let report = pipeline
        .download_channel(TEST_GUILD, &general(), Category::All, MessageAmount::All)
        .await
        .unwrap();

    let root = channel_dir(&config.download_folder, TEST_GUILD, "general");
    assert_eq!(report.directory, root);
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.failed, 1);
    assert_eq!(list_files(&root), vec!["jpg", "mp4", "png"]);
    assert_file_content(&root.join("jpg").join("pic.jpg"), b"one");
    assert_file_content(&root.join("jpg").join("pic_1.jpg"), b"two");
    assert_file_content(&root.join("mp4").join("clip.mp4"), b"three");
    assert!(list_files(&root.join("png")).is_empty());
}

#[tokio::test]
async fn test_download_filters_by_category() {
    let server = MockServer::start().await;
    mount_file(&server, "/a/song.mp3", b"la").await;
    mount_file(&server, "/a/pic.png", b"px").await;

    let temp_dir = create_temp_dir();
    let config = Arc::new(Config {
        cdn_host: "127.0.0.1".into(),
        ..(*create_test_config(temp_dir.path())).clone()
    });
    let history = FakeHistory::new().with_channel(
        1,
        vec![
            Message::attachment(format!("{}/a/song.mp3", server.uri())),
            Message::attachment(format!("{}/a/pic.png", server.uri())),
        ],
    );
    let pipeline = Pipeline::new(config.clone(), history);

    let report = pipeline
        .download_channel(TEST_GUILD, &general(), Category::Audio, MessageAmount::All)
        .await
        .unwrap();

    let root = channel_dir(&config.download_folder, TEST_GUILD, "general");
    assert_eq!(report.succeeded, 1);
    assert_eq!(list_files(&root), vec!["mp3"]);
}

#[tokio::test]
async fn test_server_wide_download_skips_failing_channel() {
    let server = MockServer::start().await;
    mount_file(&server, "/a/x.png", b"x").await;

    let temp_dir = create_temp_dir();
    let config = Arc::new(Config {
        cdn_host: "127.0.0.1".into(),
        ..(*create_test_config(temp_dir.path())).clone()
    });
    let history = FakeHistory::new()
        .with_failing_channel(1)
        .with_channel(2, vec![Message::attachment(format!("{}/a/x.png", server.uri()))]);
    let pipeline = Pipeline::new(config.clone(), history);
    let channels = vec![ChannelRef::new(1, "locked"), ChannelRef::new(2, "pics")];

    let report = pipeline
        .download_server(TEST_GUILD, &channels, Category::Images, MessageAmount::All)
        .await;

    assert_eq!(report.skipped, vec!["locked"]);
    assert_eq!(report.succeeded, 1);
    assert_file_content(
        &channel_dir(&config.download_folder, TEST_GUILD, "pics")
            .join("png")
            .join("x.png"),
        b"x",
    );
}

#[tokio::test]
async fn test_server_wide_scrape_keeps_channels_with_the_same_name_apart() {
    let temp_dir = create_temp_dir();
    let config = create_test_config(temp_dir.path());
    let history = FakeHistory::new()
        .with_channel(1, vec![Message::attachment(cdn_link("a.png"))])
        .with_channel(2, vec![Message::attachment(cdn_link("b.png"))])
        .with_channel(3, vec![Message::attachment(cdn_link("c.png"))]);
    let pipeline = Pipeline::new(config.clone(), history);
    let channels = vec![
        ChannelRef::new(1, "general"),
        ChannelRef::new(2, "general"),
        ChannelRef::new(3, "art"),
    ];

    let report = pipeline
        .scrape_server(TEST_GUILD, &channels, Category::All, MessageAmount::All, date())
        .await;

    assert_eq!(report.total_links(), 3);
    let log = |folder: &str| {
        channel_dir(&config.output_folder, TEST_GUILD, folder).join("scrape_links_2024-05-17.txt")
    };
    assert_eq!(report.logs[0].path, log("general_1"));
    assert_eq!(report.logs[1].path, log("general_2"));
    assert_eq!(report.logs[2].path, log("art"));
    assert_eq!(
        fs::read_to_string(log("general_1")).unwrap(),
        format!("\"{}\"", cdn_link("a.png"))
    );
    assert_eq!(
        fs::read_to_string(log("general_2")).unwrap(),
        format!("\"{}\"", cdn_link("b.png"))
    );
    assert!(!channel_dir(&config.output_folder, TEST_GUILD, "general").exists());
}

#[tokio::test]
async fn test_server_wide_download_keeps_channels_with_the_same_name_apart() {
    let server = MockServer::start().await;
    mount_file(&server, "/a/x.png", b"first").await;
    mount_file(&server, "/b/x.png", b"second").await;

    let temp_dir = create_temp_dir();
    let config = Arc::new(Config {
        cdn_host: "127.0.0.1".into(),
        ..(*create_test_config(temp_dir.path())).clone()
    });
    let history = FakeHistory::new()
        .with_channel(7, vec![Message::attachment(format!("{}/a/x.png", server.uri()))])
        .with_channel(8, vec![Message::attachment(format!("{}/b/x.png", server.uri()))]);
    let pipeline = Pipeline::new(config.clone(), history);
    let channels = vec![ChannelRef::new(7, "pics"), ChannelRef::new(8, "pics")];

    let report = pipeline
        .download_server(TEST_GUILD, &channels, Category::Images, MessageAmount::All)
        .await;

    assert_eq!(report.succeeded, 2);
    let file = |folder: &str| {
        channel_dir(&config.download_folder, TEST_GUILD, folder)
            .join("png")
            .join("x.png")
    };
    assert_file_content(&file("pics_7"), b"first");
    assert_file_content(&file("pics_8"), b"second");
}
