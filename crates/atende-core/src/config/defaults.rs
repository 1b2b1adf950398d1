//! Default values for config fields, including the stock storefront copy.

use super::catalog::MenuOption;
use std::collections::HashMap;

pub(super) fn default_name() -> String {
    "atende".to_string()
}

pub(super) fn default_data_dir() -> String {
    "~/.atende".to_string()
}

pub(super) fn default_reconnect_delay() -> u64 {
    5
}

pub(super) fn default_device_name() -> String {
    "Desktop".to_string()
}

pub(super) fn default_triggers() -> Vec<String> {
    ["oi", "ola", "olá", "/menu", "!start"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub(super) fn default_attendant_option() -> String {
    "btn_falar_atendente".to_string()
}

pub(super) fn default_menu_header() -> String {
    "🌸 *Bem-vinda à Luvane!* 🌟\nComo podemos te ajudar hoje?".to_string()
}

pub(super) fn default_menu_footer() -> String {
    "✨ Menu Principal - Clique em uma opção:".to_string()
}

pub(super) fn default_menu_options() -> Vec<MenuOption> {
    [
        ("btn_vendas", "1️⃣ O que vendemos"),
        ("btn_kits", "2️⃣ Kits promocionais"),
        ("btn_produtos", "3️⃣ Produtos disponíveis"),
        ("btn_comprar_info", "4️⃣ Como comprar"),
        ("btn_falar_atendente", "5️⃣ Falar com a gente"),
        ("btn_frete", "6️⃣ Calcular frete"),
        ("btn_comprar_reservar", "7️⃣ Comprar ou reservar"),
    ]
    .into_iter()
    .map(|(id, label)| MenuOption {
        id: id.to_string(),
        label: label.to_string(),
    })
    .collect()
}

pub(super) fn default_replies() -> HashMap<String, String> {
    [
        (
            "btn_vendas",
            "🛍️ Na *Luvane* você encontra:\n- Cosméticos naturais\n- Sabonetes artesanais\n- Kits de autocuidado\n- Presentes criativos 🌿",
        ),
        (
            "btn_kits",
            "🎁 Temos kits especiais com muito carinho 💖\nConfira no catálogo ou peça um kit personalizado!",
        ),
        (
            "btn_produtos",
            "📦 Veja nosso catálogo completo aqui:\n👉 [adicione o link do seu catálogo aqui]",
        ),
        (
            "btn_comprar_info",
            "💳 Você pode comprar pelo WhatsApp mesmo!\nAceitamos *PIX*, cartão e boleto. Me diga o que você deseja!",
        ),
        (
            "btn_falar_atendente",
            "📲 Um atendente vai te responder em instantes 💬\nVocê também pode escrever sua dúvida!",
        ),
        (
            "btn_frete",
            "🚛 Me envie seu *CEP* e calculo o frete pra você rapidinho!",
        ),
        (
            "btn_comprar_reservar",
            "📝 Me diga o nome do produto ou kit que deseja comprar ou reservar. Vamos finalizar sua compra juntas! 💌",
        ),
    ]
    .into_iter()
    .map(|(id, text)| (id.to_string(), text.to_string()))
    .collect()
}

pub(super) fn default_paused() -> String {
    "🤖 Bot pausado globalmente. Envie /retomar para reativar.".to_string()
}

pub(super) fn default_already_paused() -> String {
    "🤖 Bot já está pausado.".to_string()
}

pub(super) fn default_resumed() -> String {
    "🤖 Bot retomado globalmente.".to_string()
}

pub(super) fn default_already_active() -> String {
    "🤖 Bot já está ativo.".to_string()
}
