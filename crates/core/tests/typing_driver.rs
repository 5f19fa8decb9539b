// Integration tests for the typing driver against the in-memory backend.
//
// Tests cover:
// - the doubled field value produced by bulk + per-character writes
// - per-character write order and pacing (paused clock)
// - failure at session start, navigation, lookup and write
// - session release on every exit path
// - cancellation during session start and the per-character delay

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use typist::fake::{FakeBrowserBuilder, Op};
use typist::{ControlKey, Error, Selector, Stage, TypingConfig, TypingDriver};

fn hello_config() -> TypingConfig {
	TypingConfig {
		url: "https://search.test/".to_string(),
		payload: "hello".to_string(),
		delay_ms: 1,
		..Default::default()
	}
}

#[tokio::test(start_paused = true)]
async fn test_hello_produces_doubled_value_then_submit() {
	let (browser, controller) = FakeBrowserBuilder::new().build();
	let driver = TypingDriver::new(browser, hello_config());

	let report = driver.run().await.expect("run should succeed");

	assert_eq!(controller.field_value(), "hellohello");
	assert_eq!(report.field_value.as_deref(), Some("hellohello"));
	assert_eq!(controller.presses(), vec![ControlKey::Return]);
	assert!(report.bulk_written);
	assert!(report.submitted);
	assert_eq!(report.chars_typed, 5);

	assert_eq!(
		report.stages,
		vec![
			Stage::Start,
			Stage::SessionOpen,
			Stage::PageLoaded,
			Stage::ElementFound,
			Stage::FullTextWritten,
			Stage::CharByCharWritten,
			Stage::Submitted,
			Stage::End,
		]
	);

	// Submit is the last interaction before the session closes.
	let ops = controller.ops();
	assert_eq!(ops[ops.len() - 2], Op::Press(ControlKey::Return));
	assert_eq!(ops[ops.len() - 1], Op::Close);
}

#[tokio::test(start_paused = true)]
async fn test_per_character_writes_are_ordered_and_paced() {
	let (browser, controller) = FakeBrowserBuilder::new().build();
	let config = TypingConfig {
		delay_ms: 10,
		..hello_config()
	};
	let driver = TypingDriver::new(browser, config);

	let report = driver.run().await.expect("run should succeed");

	let writes = controller.writes();
	assert_eq!(writes, vec!["hello", "h", "e", "l", "l", "o"]);

	let times = controller.write_times();
	let per_char = &times[1..];
	for pair in per_char.windows(2) {
		assert!(pair[1] - pair[0] >= Duration::from_millis(10));
	}
	assert!(per_char[per_char.len() - 1] - per_char[0] >= Duration::from_millis(10) * 4);
	assert!(report.typing_elapsed >= Duration::from_millis(10) * 4);
}

#[tokio::test(start_paused = true)]
async fn test_multibyte_payload_is_split_by_character() {
	let (browser, controller) = FakeBrowserBuilder::new().build();
	let config = TypingConfig {
		payload: "añ✓".to_string(),
		bulk_write: false,
		..hello_config()
	};

	let report = TypingDriver::new(browser, config).run().await.unwrap();

	assert_eq!(controller.writes(), vec!["a", "ñ", "✓"]);
	assert_eq!(report.chars_typed, 3);
	assert_eq!(controller.field_value(), "añ✓");
}

#[tokio::test(start_paused = true)]
async fn test_bulk_write_can_be_disabled() {
	let (browser, controller) = FakeBrowserBuilder::new().build();
	let config = TypingConfig {
		bulk_write: false,
		submit: false,
		..hello_config()
	};

	let report = TypingDriver::new(browser, config).run().await.unwrap();

	assert_eq!(controller.field_value(), "hello");
	assert!(!report.bulk_written);
	assert!(!report.submitted);
	assert!(controller.presses().is_empty());
	assert_eq!(report.stage(), Stage::End);
	assert!(!report.stages.contains(&Stage::FullTextWritten));
	assert!(report.stages.contains(&Stage::CharByCharWritten));
}

#[tokio::test(start_paused = true)]
async fn test_missing_element_writes_nothing() {
	let (browser, controller) = FakeBrowserBuilder::new().without_field().build();
	let driver = TypingDriver::new(browser, hello_config());

	let err = driver.run().await.unwrap_err();

	assert!(matches!(err, Error::ElementNotFound { ref selector } if *selector == Selector::name("q")));
	assert_eq!(err.operation(), "find element");
	assert!(controller.writes().is_empty());
	assert!(controller.presses().is_empty());
	assert_eq!(controller.sessions_closed(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_page_without_field_misses_every_selector() {
	let (browser, controller) = FakeBrowserBuilder::new().without_field().build();
	let config = TypingConfig {
		selector: Selector::Css(":not(*)".into()),
		..hello_config()
	};

	let err = TypingDriver::new(browser, config).run().await.unwrap_err();

	assert!(err.is_element_not_found());
	assert!(controller.writes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_session_start_failure_stops_before_navigation() {
	let (browser, controller) = FakeBrowserBuilder::new().fail_open().build();
	let driver = TypingDriver::new(browser, hello_config());

	let err = driver.run().await.unwrap_err();

	assert!(matches!(err, Error::SessionStart(_)));
	assert_eq!(controller.ops(), vec![Op::Open]);
	assert_eq!(controller.sessions_closed(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_navigation_failure_closes_session() {
	let (browser, controller) = FakeBrowserBuilder::new().fail_goto().build();
	let driver = TypingDriver::new(browser, hello_config());

	let err = driver.run().await.unwrap_err();

	assert!(matches!(err, Error::Navigation { ref url, .. } if url == "https://search.test/"));
	assert!(!controller.ops().iter().any(|op| matches!(op, Op::Find(_))));
	assert_eq!(controller.sessions_closed(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_write_failure_mid_typing_closes_session() {
	let (browser, controller) = FakeBrowserBuilder::new().fail_send_after(3).build();
	let driver = TypingDriver::new(browser, hello_config());

	let err = driver.run().await.unwrap_err();

	assert_eq!(err.operation(), "send keys");
	assert_eq!(controller.field_value(), "hellohe");
	assert!(controller.presses().is_empty());
	assert_eq!(controller.sessions_closed(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_close_failure_after_success_is_reported() {
	let (browser, controller) = FakeBrowserBuilder::new().fail_close().build();
	let err = TypingDriver::new(browser, hello_config()).run().await.unwrap_err();

	assert_eq!(err.operation(), "close session");
	assert_eq!(controller.presses(), vec![ControlKey::Return]);
}

#[tokio::test(start_paused = true)]
async fn test_original_error_wins_over_close_failure() {
	let (browser, _controller) = FakeBrowserBuilder::new().without_field().fail_close().build();
	let err = TypingDriver::new(browser, hello_config()).run().await.unwrap_err();

	assert!(err.is_element_not_found());
}

#[tokio::test(start_paused = true)]
async fn test_rerun_without_reload_concatenates_further() {
	let (browser, controller) = FakeBrowserBuilder::new().keep_value_on_navigation().build();
	let driver = TypingDriver::new(browser, hello_config());

	driver.run().await.unwrap();
	assert_eq!(controller.field_value(), "hellohello");

	driver.run().await.unwrap();
	assert_eq!(controller.field_value(), "hellohellohellohello");
	assert_eq!(controller.sessions_opened(), 2);
	assert_eq!(controller.sessions_closed(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_rerun_on_fresh_page_repeats_same_output() {
	let (browser, controller) = FakeBrowserBuilder::new().build();
	let driver = TypingDriver::new(browser, hello_config());

	let first = driver.run().await.unwrap();
	let second = driver.run().await.unwrap();

	assert_eq!(first.field_value, second.field_value);
	assert_eq!(controller.field_value(), "hellohello");
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_delay_closes_session() {
	let (browser, controller) = FakeBrowserBuilder::new().build();
	let config = TypingConfig {
		delay_ms: 1_000,
		..hello_config()
	};
	let driver = TypingDriver::new(browser, config);
	let cancel = CancellationToken::new();

	let trigger = cancel.clone();
	tokio::spawn(async move {
		tokio::time::sleep(Duration::from_millis(2_500)).await;
		trigger.cancel();
	});

	let err = driver.run_with_cancel(&cancel).await.unwrap_err();

	assert!(matches!(err, Error::Cancelled { stage: Stage::FullTextWritten }));
	assert_eq!(controller.writes(), vec!["hello", "h", "e", "l"]);
	assert!(controller.presses().is_empty());
	assert_eq!(controller.sessions_closed(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_while_opening_still_closes_session() {
	let (browser, controller) = FakeBrowserBuilder::new().open_delay(Duration::from_millis(500)).build();
	let driver = TypingDriver::new(browser, hello_config());
	let cancel = CancellationToken::new();

	let trigger = cancel.clone();
	tokio::spawn(async move {
		tokio::time::sleep(Duration::from_millis(100)).await;
		trigger.cancel();
	});

	let err = driver.run_with_cancel(&cancel).await.unwrap_err();

	assert!(matches!(err, Error::Cancelled { stage: Stage::SessionOpen }));
	assert_eq!(controller.sessions_opened(), 1);
	assert_eq!(controller.sessions_closed(), 1);
	assert_eq!(controller.ops(), vec![Op::Open, Op::Close]);
}

#[tokio::test]
async fn test_cancel_before_start_opens_nothing() {
	let (browser, controller) = FakeBrowserBuilder::new().build();
	let cancel = CancellationToken::new();
	cancel.cancel();

	let err = TypingDriver::new(browser, hello_config()).run_with_cancel(&cancel).await.unwrap_err();

	assert!(matches!(err, Error::Cancelled { stage: Stage::Start }));
	assert!(controller.ops().is_empty());
}

#[tokio::test]
async fn test_invalid_config_is_rejected_before_opening() {
	let (browser, controller) = FakeBrowserBuilder::new().build();
	let config = TypingConfig {
		payload: String::new(),
		..hello_config()
	};

	let err = TypingDriver::new(browser, config).run().await.unwrap_err();

	assert!(matches!(err, Error::Config(_)));
	assert!(controller.ops().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_custom_selector_and_submit_key() {
	let (browser, controller) = FakeBrowserBuilder::new().field(Selector::Id("search".into())).build();
	let config = TypingConfig {
		selector: Selector::Id("search".into()),
		submit_key: ControlKey::Enter,
		..hello_config()
	};

	TypingDriver::new(browser, config).run().await.unwrap();

	assert!(controller.ops().contains(&Op::Find(Selector::Id("search".into()))));
	assert_eq!(controller.presses(), vec![ControlKey::Enter]);
}
