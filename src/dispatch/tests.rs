use super::*;
use atende_core::config::Catalog;
use atende_core::error::AtendeError;
use atende_core::event::{Credentials, TransportEvent, VersionInfo};
use atende_core::message::{Envelope, Payload};
use atende_core::traits::Transport;
use atende_transport::{ConnectionManager, SessionStore};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

fn intent(text: &str, option: Option<&str>) -> Intent {
    Intent {
        text: text.to_string(),
        selected_option: option.map(String::from),
    }
}

fn envelope(payload: Payload, from_self: bool) -> Envelope {
    Envelope {
        sender: "5511999887766@s.whatsapp.net".to_string(),
        sender_name: "Cliente".to_string(),
        from_self,
        payload,
    }
}

fn router() -> Router {
    Router::new(Catalog::default())
}

// --- classifier ---

#[test]
fn test_classify_conversation_lowercases() {
    let env = envelope(Payload::Conversation("Oi".into()), false);
    assert_eq!(classify(&env), intent("oi", None));
}

#[test]
fn test_classify_extended_text() {
    let env = envelope(Payload::ExtendedText("Olá!".into()), false);
    assert_eq!(classify(&env), intent("olá!", None));
}

#[test]
fn test_classify_image_caption() {
    let env = envelope(Payload::ImageCaption("MEU Pedido".into()), false);
    assert_eq!(classify(&env), intent("meu pedido", None));
}

#[test]
fn test_classify_video_caption() {
    let env = envelope(Payload::VideoCaption("Veja".into()), false);
    assert_eq!(classify(&env), intent("veja", None));
}

#[test]
fn test_classify_button_reply_keeps_id_and_lowers_label() {
    let env = envelope(
        Payload::ButtonReply {
            id: "btn_frete".into(),
            label: "6️⃣ Calcular frete".into(),
        },
        false,
    );
    assert_eq!(classify(&env), intent("6️⃣ calcular frete", Some("btn_frete")));
}

#[test]
fn test_classify_unsupported_is_empty() {
    let env = envelope(Payload::Unsupported, false);
    let got = classify(&env);
    assert!(got.text.is_empty());
    assert!(got.selected_option.is_none());
}

#[test]
fn test_classify_does_not_trim() {
    let env = envelope(Payload::Conversation(" Oi".into()), false);
    assert_eq!(classify(&env).text, " oi");
}

// --- router: menu triggers ---

#[test]
fn test_greeting_replies_menu() {
    assert_eq!(router().route(&intent("oi", None), false, true), Action::ReplyMenu);
}

#[test]
fn test_every_trigger_replies_menu() {
    let r = router();
    for kw in ["oi", "ola", "olá", "/menu", "!start"] {
        assert_eq!(r.route(&intent(kw, None), false, true), Action::ReplyMenu);
    }
}

#[test]
fn test_trigger_with_surrounding_whitespace_is_noop() {
    // Keyword matching is exact: no trimming happens anywhere.
    let r = router();
    assert_eq!(r.route(&intent(" oi", None), false, true), Action::Noop);
    assert_eq!(r.route(&intent("oi ", None), false, true), Action::Noop);
}

#[test]
fn test_free_text_is_noop() {
    assert_eq!(
        router().route(&intent("quanto custa o kit?", None), false, true),
        Action::Noop
    );
}

#[test]
fn test_empty_intent_is_noop() {
    assert_eq!(router().route(&intent("", None), false, true), Action::Noop);
}

// --- router: button replies ---

#[test]
fn test_known_button_gets_canned_reply() {
    let action = router().route(&intent("", Some("btn_frete")), false, true);
    assert_eq!(
        action,
        Action::ReplyText {
            text: "🚛 Me envie seu *CEP* e calculo o frete pra você rapidinho!".into(),
            handoff_alert: false,
        }
    );
}

#[test]
fn test_unknown_button_is_noop() {
    assert_eq!(
        router().route(&intent("", Some("btn_desconhecido")), false, true),
        Action::Noop
    );
}

#[test]
fn test_handoff_button_raises_alert() {
    let action = router().route(&intent("", Some("btn_falar_atendente")), false, true);
    match action {
        Action::ReplyText { handoff_alert, .. } => assert!(handoff_alert),
        other => panic!("expected ReplyText, got {other:?}"),
    }
}

// --- router: owner control ---

#[test]
fn test_owner_pause_when_active() {
    let action = router().route(&intent("/pausar", None), true, true);
    assert_eq!(
        action,
        Action::SetActive {
            active: false,
            ack: "🤖 Bot pausado globalmente. Envie /retomar para reativar.".into(),
        }
    );
}

#[test]
fn test_owner_pause_when_already_paused() {
    let action = router().route(&intent("/pausar", None), true, false);
    assert_eq!(action, Action::Acknowledge("🤖 Bot já está pausado.".into()));
}

#[test]
fn test_owner_resume_when_paused() {
    let action = router().route(&intent("/retomar", None), true, false);
    assert_eq!(
        action,
        Action::SetActive {
            active: true,
            ack: "🤖 Bot retomado globalmente.".into(),
        }
    );
}

#[test]
fn test_owner_resume_when_already_active() {
    let action = router().route(&intent("/retomar", None), true, true);
    assert_eq!(action, Action::Acknowledge("🤖 Bot já está ativo.".into()));
}

#[test]
fn test_owner_can_resume_while_paused() {
    // The pause gate sits after owner-command handling, so the owner is
    // never locked out of /retomar.
    let action = router().route(&intent("/retomar", None), true, false);
    assert!(matches!(action, Action::SetActive { active: true, .. }));
}

#[test]
fn test_control_commands_are_exact_matches() {
    let r = router();
    assert_eq!(r.route(&intent("/pausar ", None), true, true), Action::Noop);
    assert_eq!(r.route(&intent("/pausar agora", None), true, true), Action::Noop);
    assert_eq!(r.route(&intent("pausar", None), true, true), Action::Noop);
}

#[test]
fn test_control_commands_ignored_from_customers() {
    let r = router();
    assert_eq!(r.route(&intent("/pausar", None), false, true), Action::Noop);
    assert_eq!(r.route(&intent("/retomar", None), false, false), Action::Noop);
}

#[test]
fn test_owner_chatter_is_never_answered() {
    let r = router();
    // Greetings, buttons, anything — self-sent non-commands are no-ops,
    // active or not.
    assert_eq!(r.route(&intent("oi", None), true, true), Action::Noop);
    assert_eq!(r.route(&intent("oi", None), true, false), Action::Noop);
    assert_eq!(r.route(&intent("", Some("btn_frete")), true, true), Action::Noop);
}

// --- router: pause gate ---

#[test]
fn test_paused_bot_ignores_customers() {
    let r = router();
    assert_eq!(r.route(&intent("oi", None), false, false), Action::Noop);
    assert_eq!(r.route(&intent("", Some("btn_frete")), false, false), Action::Noop);
    assert_eq!(
        r.route(&intent("", Some("btn_falar_atendente")), false, false),
        Action::Noop
    );
}

// --- switch ---

#[test]
fn test_switch_defaults_active() {
    assert!(BotSwitch::default().is_active());
}

#[test]
fn test_switch_round_trip() {
    let switch = BotSwitch::default();
    switch.set_active(false);
    assert!(!switch.is_active());
    switch.set_active(true);
    assert!(switch.is_active());
}

// --- dispatcher, end to end over a scripted transport ---

/// Transport double: the test pushes events, the dispatcher's sends are
/// recorded. Menus are recorded as "<menu>".
struct LiveTransport {
    events_tx: Mutex<Option<mpsc::Sender<TransportEvent>>>,
    sent: Mutex<Vec<(String, String)>>,
    failures_left: Mutex<usize>,
}

impl LiveTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            events_tx: Mutex::new(None),
            sent: Mutex::new(Vec::new()),
            failures_left: Mutex::new(0),
        })
    }

    async fn emit(&self, event: TransportEvent) {
        let tx = self
            .events_tx
            .lock()
            .unwrap()
            .clone()
            .expect("connect not called yet");
        tx.send(event).await.expect("manager dropped event stream");
    }

    fn sent_texts(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(_, t)| t.clone()).collect()
    }

    async fn wait_for_sends(&self, count: usize) {
        for _ in 0..200 {
            if self.sent.lock().unwrap().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!(
            "timed out waiting for {count} sends, got {:?}",
            self.sent_texts()
        );
    }
}

#[async_trait]
impl Transport for LiveTransport {
    async fn discover_version(&self) -> Result<VersionInfo, AtendeError> {
        Ok(VersionInfo {
            version: [2, 3000, 0],
            is_latest: true,
        })
    }

    async fn connect(
        &self,
        _credentials: Option<Credentials>,
    ) -> Result<mpsc::Receiver<TransportEvent>, AtendeError> {
        let (tx, rx) = mpsc::channel(16);
        *self.events_tx.lock().unwrap() = Some(tx);
        Ok(rx)
    }

    async fn send(
        &self,
        recipient: &str,
        content: atende_core::message::Outbound,
    ) -> Result<(), AtendeError> {
        {
            let mut failures = self.failures_left.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(AtendeError::Transport("delivery rejected".into()));
            }
        }
        let text = match content {
            atende_core::message::Outbound::Text(t) => t,
            atende_core::message::Outbound::Menu(_) => "<menu>".to_string(),
        };
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), text));
        Ok(())
    }
}

async fn start_bot(transport: Arc<LiveTransport>) -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let store = SessionStore::new(tmp.path().join("session")).unwrap();
    let manager = Arc::new(ConnectionManager::new(
        transport.clone(),
        store,
        Duration::from_secs(5),
    ));
    let handle = manager.handle();
    let envelopes = manager.start().await.unwrap();
    let dispatcher = Dispatcher::new(handle, Catalog::default());
    tokio::spawn(async move { dispatcher.run(envelopes).await });
    transport.emit(TransportEvent::Opened).await;
    tmp
}

fn text_msg(text: &str, from_self: bool) -> TransportEvent {
    TransportEvent::Messages(vec![envelope(Payload::Conversation(text.into()), from_self)])
}

#[tokio::test]
async fn test_owner_pause_gates_customers_until_resume() {
    let transport = LiveTransport::new();
    let _tmp = start_bot(transport.clone()).await;

    transport.emit(text_msg("/pausar", true)).await;
    transport.emit(text_msg("oi", false)).await;
    transport.emit(text_msg("/retomar", true)).await;
    transport.emit(text_msg("oi", false)).await;

    transport.wait_for_sends(3).await;
    assert_eq!(
        transport.sent_texts(),
        vec![
            "🤖 Bot pausado globalmente. Envie /retomar para reativar.",
            "🤖 Bot retomado globalmente.",
            "<menu>",
        ],
        "the greeting while paused must produce nothing"
    );
}

#[tokio::test]
async fn test_double_pause_acknowledges_without_state_change() {
    let transport = LiveTransport::new();
    let _tmp = start_bot(transport.clone()).await;

    transport.emit(text_msg("/pausar", true)).await;
    transport.emit(text_msg("/pausar", true)).await;
    transport.emit(text_msg("/retomar", true)).await;
    transport.emit(text_msg("oi", false)).await;

    transport.wait_for_sends(4).await;
    assert_eq!(
        transport.sent_texts(),
        vec![
            "🤖 Bot pausado globalmente. Envie /retomar para reativar.",
            "🤖 Bot já está pausado.",
            "🤖 Bot retomado globalmente.",
            "<menu>",
        ]
    );
}

#[tokio::test]
async fn test_button_click_gets_reply_and_unknown_payloads_are_skipped() {
    let transport = LiveTransport::new();
    let _tmp = start_bot(transport.clone()).await;

    transport
        .emit(TransportEvent::Messages(vec![
            envelope(Payload::Unsupported, false),
            envelope(
                Payload::ButtonReply {
                    id: "btn_frete".into(),
                    label: "6️⃣ Calcular frete".into(),
                },
                false,
            ),
        ]))
        .await;

    transport.wait_for_sends(1).await;
    assert_eq!(
        transport.sent_texts(),
        vec!["🚛 Me envie seu *CEP* e calculo o frete pra você rapidinho!"]
    );
}

#[tokio::test]
async fn test_failed_send_does_not_stop_the_dispatcher() {
    let transport = LiveTransport::new();
    let _tmp = start_bot(transport.clone()).await;

    *transport.failures_left.lock().unwrap() = 1;
    transport.emit(text_msg("oi", false)).await;
    transport.emit(text_msg("olá", false)).await;

    transport.wait_for_sends(1).await;
    assert_eq!(transport.sent_texts(), vec!["<menu>"]);
}
