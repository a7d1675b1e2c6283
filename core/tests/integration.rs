//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts its own mock server on a random port, so tests run in
//! parallel with isolated state, then drives the client over real HTTP.
//! Envelope outcomes are asserted explicitly: remote failures arrive as
//! `ApiResponse::Error` values, never as `Err`.

use zulip_core::auth;
use zulip_core::channel::subscription::GetSubscriptionsParams;
use zulip_core::channel::topic::GetChannelTopicsParams;
use zulip_core::channel::{CreateChannelParams, GetChannelsParams, UpdateChannelParams};
use zulip_core::draft::{DraftContent, DraftKind};
use zulip_core::event::{GetEventsParams, RegisterQueueParams};
use zulip_core::message::{
    DisplayRecipient, EditMessageChange, EditMessageParams, GetMessagesParams, ReactionParams,
    Recipients, SendMessageParams, StreamTarget,
};
use zulip_core::navigation_view::{EditNavigationViewParams, NavigationView};
use zulip_core::reminder::CreateReminderParams;
use zulip_core::snippet::{CreateSnippetParams, EditSnippetParams};
use zulip_core::user::GetUserParams;
use zulip_core::{ApiError, ApiResponse, Client};

/// Start a fresh mock server on a random port and return its base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn client(base: &str) -> Client {
    Client::new(base, mock_server::EMAIL, mock_server::API_KEY)
}

fn expect_success<T>(resp: ApiResponse<T>) -> T {
    match resp {
        ApiResponse::Success { data, .. } => data,
        ApiResponse::Error { msg, code } => panic!("unexpected error envelope: {msg} ({code})"),
    }
}

fn expect_error<T>(resp: ApiResponse<T>) -> (String, String) {
    match resp {
        ApiResponse::Error { msg, code } => (msg, code),
        ApiResponse::Success { .. } => panic!("expected an error envelope"),
    }
}

#[test]
fn credential_flows_exchange_login_material_for_the_key() {
    let base = start_server();

    let key = auth::fetch_api_key(&base, mock_server::EMAIL, mock_server::PASSWORD).unwrap();
    assert_eq!(key, mock_server::API_KEY);

    let key = auth::fetch_dev_api_key(&base, mock_server::EMAIL).unwrap();
    assert_eq!(key, mock_server::API_KEY);

    let key = auth::fetch_api_key_jwt(&base, mock_server::JWT_TOKEN).unwrap();
    assert_eq!(key, mock_server::API_KEY);
}

#[test]
fn wrong_password_raises_auth_failed() {
    let base = start_server();
    let err = auth::fetch_api_key(&base, mock_server::EMAIL, "not-the-password").unwrap_err();
    match err {
        ApiError::AuthFailed { msg, code } => {
            assert_eq!(msg, "Your username or password is incorrect.");
            assert_eq!(code, "AUTHENTICATION_FAILED");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn invalid_api_key_comes_back_as_an_error_envelope() {
    let base = start_server();
    let client = Client::new(&base, mock_server::EMAIL, "wrong-key");
    let (msg, code) = expect_error(client.get_drafts().unwrap());
    assert_eq!(msg, "Invalid API key");
    assert_eq!(code, "UNAUTHORIZED");
}

#[test]
fn trailing_slash_variants_reach_the_same_server() {
    let base = start_server();
    for server_url in [base.clone(), format!("{base}/"), format!("{base}///")] {
        let client = client(&server_url);
        expect_success(client.get_drafts().unwrap());
    }
}

#[test]
fn message_lifecycle() {
    let base = start_server();
    let client = client(&base);

    // Send to the seeded channel and check the whole envelope shape.
    let params = SendMessageParams::stream(StreamTarget::Id(1), "standup", "hi from the tests");
    let id = match client.send_message(&params).unwrap() {
        ApiResponse::Success { msg, data, .. } => {
            assert_eq!(msg, "");
            data.id
        }
        ApiResponse::Error { msg, code } => panic!("send failed: {msg} ({code})"),
    };

    // The history endpoint returns the rendered message.
    let batch = expect_success(client.get_messages(&GetMessagesParams::default()).unwrap());
    assert_eq!(batch.messages.len(), 1);
    assert_eq!(batch.messages[0].id, id);
    assert_eq!(batch.messages[0].content, "<p>hi from the tests</p>");
    assert_eq!(
        batch.messages[0].display_recipient,
        DisplayRecipient::Stream("general".to_string())
    );
    assert!(batch.found_anchor);

    // Content edit.
    let edit = EditMessageParams {
        change: Some(EditMessageChange::Content {
            content: "amended".to_string(),
        }),
        ..Default::default()
    };
    expect_success(client.edit_message(id, &edit).unwrap());
    let batch = expect_success(client.get_messages(&GetMessagesParams::default()).unwrap());
    assert_eq!(batch.messages[0].content, "<p>amended</p>");

    // Reactions: adding twice is a remote error, not a client one.
    expect_success(client.add_reaction(id, &ReactionParams::by_name("octopus")).unwrap());
    let (msg, _) = expect_error(client.add_reaction(id, &ReactionParams::by_name("octopus")).unwrap());
    assert_eq!(msg, "Reaction already exists.");

    // An empty parameter object is a malformed removal request.
    let (msg, code) = expect_error(
        client
            .remove_reaction(id, Some(&ReactionParams::default()))
            .unwrap(),
    );
    assert_eq!(msg, "Missing 'emoji_name' argument");
    assert_eq!(code, "REQUEST_VARIABLE_MISSING");

    // A bodyless removal drops the reaction.
    expect_success(client.remove_reaction(id, None).unwrap());
    let (msg, _) = expect_error(client.remove_reaction(id, None).unwrap());
    assert_eq!(msg, "Reaction doesn't exist.");

    // Delete, then delete again.
    expect_success(client.delete_message(id).unwrap());
    let (msg, _) = expect_error(client.delete_message(id).unwrap());
    assert_eq!(msg, "Invalid message(s)");
}

#[test]
fn direct_messages_render_user_recipients() {
    let base = start_server();
    let client = client(&base);

    let params = SendMessageParams::direct(Recipients::UserIds(vec![11]), "psst");
    expect_success(client.send_message(&params).unwrap());

    let batch = expect_success(client.get_messages(&GetMessagesParams::default()).unwrap());
    match &batch.messages[0].display_recipient {
        DisplayRecipient::Users(users) => assert_eq!(users[0].email, mock_server::EMAIL),
        other => panic!("unexpected recipient: {other:?}"),
    }
    assert_eq!(batch.messages[0].subject, "");
}

#[test]
fn channel_lifecycle() {
    let base = start_server();
    let client = client(&base);

    // The seeded channel is visible, and reads are idempotent.
    let first = expect_success(client.get_channels(&GetChannelsParams::default()).unwrap());
    let second = expect_success(client.get_channels(&GetChannelsParams::default()).unwrap());
    assert_eq!(first, second);
    assert!(first.streams.iter().any(|c| c.name == "general"));

    let resolved = expect_success(client.get_channel_id("general").unwrap());
    assert_eq!(resolved.stream_id, 1);
    let (msg, _) = expect_error(client.get_channel_id("nonexistent").unwrap());
    assert_eq!(msg, "Invalid channel name 'nonexistent'");

    // Create, rename, re-describe, archive.
    let created =
        expect_success(client.create_channel(&CreateChannelParams::new("sandbox", vec![11])).unwrap());
    expect_success(
        client
            .update_channel(
                created.id,
                &UpdateChannelParams::Rename {
                    new_name: "ops".to_string(),
                },
            )
            .unwrap(),
    );
    expect_success(
        client
            .update_channel(
                created.id,
                &UpdateChannelParams::Description {
                    description: "incident response".to_string(),
                },
            )
            .unwrap(),
    );
    let fetched = expect_success(client.get_channel_by_id(created.id).unwrap());
    assert_eq!(fetched.stream.name, "ops");
    assert_eq!(fetched.stream.description, "incident response");

    expect_success(client.archive_channel(created.id).unwrap());
    let fetched = expect_success(client.get_channel_by_id(created.id).unwrap());
    assert!(fetched.stream.is_archived);
}

#[test]
fn draft_lifecycle() {
    let base = start_server();
    let client = client(&base);

    let listed = expect_success(client.get_drafts().unwrap());
    assert_eq!(listed.count, 0);

    let drafts = [DraftContent {
        kind: DraftKind::Stream,
        to: vec![1],
        topic: "standup".to_string(),
        content: "notes so far".to_string(),
    }];
    let created = expect_success(client.create_drafts(&drafts).unwrap());
    assert_eq!(created.ids.len(), 1);
    let id = created.ids[0];

    let replacement = DraftContent {
        content: "revised notes".to_string(),
        ..drafts[0].clone()
    };
    expect_success(client.edit_draft(id, &replacement).unwrap());

    let listed = expect_success(client.get_drafts().unwrap());
    assert_eq!(listed.count, 1);
    assert_eq!(listed.drafts[0].content.content, "revised notes");

    expect_success(client.delete_draft(id).unwrap());
    let (msg, _) = expect_error(client.delete_draft(id).unwrap());
    assert_eq!(msg, "Draft does not exist");
}

#[test]
fn snippet_lifecycle() {
    let base = start_server();
    let client = client(&base);

    let created = expect_success(
        client
            .create_snippet(&CreateSnippetParams {
                title: "greeting".to_string(),
                content: "hello there".to_string(),
            })
            .unwrap(),
    );
    let id = created.saved_snippet_id;

    expect_success(
        client
            .edit_snippet(
                id,
                &EditSnippetParams::Content {
                    content: "general kenobi".to_string(),
                },
            )
            .unwrap(),
    );

    let listed = expect_success(client.get_snippets().unwrap());
    assert_eq!(listed.saved_snippets.len(), 1);
    assert_eq!(listed.saved_snippets[0].title, "greeting");
    assert_eq!(listed.saved_snippets[0].content, "general kenobi");

    expect_success(client.delete_snippet(id).unwrap());
    let listed = expect_success(client.get_snippets().unwrap());
    assert!(listed.saved_snippets.is_empty());
}

#[test]
fn navigation_view_lifecycle() {
    let base = start_server();
    let client = client(&base);

    // Fragments contain slashes; the client escapes them in paths.
    let fragment = "narrow/is/starred";
    expect_success(
        client
            .add_navigation_view(&NavigationView {
                fragment: fragment.to_string(),
                is_pinned: false,
                name: None,
            })
            .unwrap(),
    );

    expect_success(
        client
            .edit_navigation_view(fragment, &EditNavigationViewParams::Pinned { is_pinned: true })
            .unwrap(),
    );

    let listed = expect_success(client.get_navigation_views().unwrap());
    assert_eq!(listed.navigation_views.len(), 1);
    assert_eq!(listed.navigation_views[0].fragment, fragment);
    assert!(listed.navigation_views[0].is_pinned);

    expect_success(client.remove_navigation_view(fragment).unwrap());
    let (msg, _) = expect_error(client.remove_navigation_view(fragment).unwrap());
    assert_eq!(msg, "Navigation view does not exist.");
}

#[test]
fn upload_then_list_attachments() {
    let base = start_server();
    let client = client(&base);

    let uploaded = expect_success(
        client
            .upload_file("report.txt", b"quarterly numbers".to_vec())
            .unwrap(),
    );
    assert!(uploaded.url.ends_with("/report.txt"));
    assert_eq!(uploaded.uri, uploaded.url);
    assert_eq!(uploaded.filename, "report.txt");

    let listed = expect_success(client.get_attachments().unwrap());
    assert_eq!(listed.attachments.len(), 1);
    assert_eq!(listed.attachments[0].name, "report.txt");
    assert_eq!(listed.upload_space_used, 17);
}

#[test]
fn event_queue_round_trip() {
    let base = start_server();
    let client = client(&base);

    let registered = expect_success(
        client
            .register_event_queue(&RegisterQueueParams {
                event_types: Some(vec!["message".to_string()]),
                ..Default::default()
            })
            .unwrap(),
    );
    assert_eq!(registered.last_event_id, -1);

    let polled = expect_success(
        client
            .get_events(&GetEventsParams {
                queue_id: registered.queue_id.clone(),
                last_event_id: Some(-1),
                dont_block: Some(true),
            })
            .unwrap(),
    );
    assert_eq!(polled.events[0].event_type, "heartbeat");

    expect_success(client.delete_event_queue(&registered.queue_id).unwrap());
    let (_, code) = expect_error(client.delete_event_queue(&registered.queue_id).unwrap());
    assert_eq!(code, "BAD_EVENT_QUEUE_ID");
}

#[test]
fn fixture_read_endpoints_deserialize() {
    let base = start_server();
    let client = client(&base);

    let user = expect_success(client.get_user(11, &GetUserParams::default()).unwrap());
    assert_eq!(user.user.email, mock_server::EMAIL);
    let (msg, _) = expect_error(client.get_user(999, &GetUserParams::default()).unwrap());
    assert_eq!(msg, "No such user");

    let status = expect_success(client.get_user_status(11).unwrap());
    assert_eq!(status.status.status_text.as_deref(), Some("out to lunch"));

    let subs = expect_success(
        client
            .get_subscriptions(&GetSubscriptionsParams::default())
            .unwrap(),
    );
    assert!(subs.subscriptions.iter().any(|s| s.name == "general"));

    let scheduled = expect_success(client.get_scheduled_messages().unwrap());
    assert_eq!(scheduled.scheduled_messages.len(), 1);
    assert!(!scheduled.scheduled_messages[0].failed);
}

#[test]
fn reminders_and_topics_follow_sent_messages() {
    let base = start_server();
    let client = client(&base);

    let params = SendMessageParams::stream(StreamTarget::Name("general".to_string()), "plans", "soon");
    let sent = expect_success(client.send_message(&params).unwrap());

    let reminder = expect_success(
        client
            .create_reminder(&CreateReminderParams {
                message_id: sent.id,
                scheduled_delivery_timestamp: 1754092800,
                note: None,
            })
            .unwrap(),
    );
    assert!(reminder.reminder_id > 0);

    let topics = expect_success(
        client
            .get_channel_topics(1, &GetChannelTopicsParams::default())
            .unwrap(),
    );
    assert_eq!(topics.topics.len(), 1);
    assert_eq!(topics.topics[0].name, "plans");
    assert_eq!(topics.topics[0].max_id, sent.id);
}
