use serde::Serialize;
use tracing::debug;

use crate::address::AddressEncoder;
use crate::amount;
use crate::config::Config;
use crate::decoder::Decoded;
use crate::error::Error;
use crate::registry::ONG_DECIMALS;
use crate::types::{ContractKind, ParamKind, Transaction};

const ONG_TICKER: &str = "ONG";
/// Public keys listed individually before the rest are summarized.
const MAX_PUBKEY_DISPLAY: u64 = 3;

/// Output model for the review screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayModel {
    pub title: String,
    pub finish_title: String,
    pub blind: bool,
    pub items: Vec<DisplayItem>,
}

impl DisplayModel {
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Render(e.to_string()))
    }

    /// Value of the first item with this label.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.label == label)
            .map(|item| item.value.as_str())
    }
}

/// A single label+value pair for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayItem {
    pub label: String,
    pub value: String,
}

impl DisplayItem {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Labels whose text depends on the screen size.
struct Labels {
    peer_pubkey: &'static str,
    peer_incentive: &'static str,
    user_incentive: &'static str,
    node_amount: &'static str,
}

const SHORT_LABELS: Labels = Labels {
    peer_pubkey: "Node OP. PK",
    peer_incentive: "Node INCTV. Ratio",
    user_incentive: "User INCTV. Ratio",
    node_amount: "Remaining Nodes",
};

const LONG_LABELS: Labels = Labels {
    peer_pubkey: "Node Operation Public Key",
    peer_incentive: "Incentive Sharing Ratio (Node)",
    user_incentive: "Incentive Sharing Ratio (User)",
    node_amount: "Number of Remaining Nodes",
};

#[derive(Debug, Clone, Copy)]
enum Field {
    From,
    To,
    Amount,
    Spender,
    PeerPubkey,
    StakeAddress,
    StakeAmount,
    MaxAuthorize,
    PeerIncentive,
    UserIncentive,
}

impl Field {
    fn label(self, labels: &Labels) -> &'static str {
        match self {
            Field::From => "From",
            Field::To => "To",
            Field::Amount => "Amount",
            Field::Spender => "Spender",
            Field::PeerPubkey => labels.peer_pubkey,
            Field::StakeAddress => "Stake Address",
            Field::StakeAmount => "Stake Amount",
            Field::MaxAuthorize => "Allowed User Stake",
            Field::PeerIncentive => labels.peer_incentive,
            Field::UserIncentive => labels.user_incentive,
        }
    }
}

/// Screen layout of a method: the i-th field labels parameter slot `i` and is shown
/// at the given position.
struct Layout {
    title: &'static str,
    finish_title: &'static str,
    fields: &'static [(Field, usize)],
}

const FROM_AMOUNT_TO: &[(Field, usize)] = &[(Field::From, 0), (Field::To, 2), (Field::Amount, 1)];
// NeoVM pushes arguments last to first.
const NEOVM_FROM_AMOUNT_TO: &[(Field, usize)] =
    &[(Field::Amount, 1), (Field::To, 2), (Field::From, 0)];
const SPENDER_FROM_AMOUNT_TO: &[(Field, usize)] = &[
    (Field::Spender, 0),
    (Field::From, 1),
    (Field::To, 3),
    (Field::Amount, 2),
];
const NEOVM_SPENDER_FROM_AMOUNT_TO: &[(Field, usize)] = &[
    (Field::Amount, 2),
    (Field::To, 3),
    (Field::From, 1),
    (Field::Spender, 0),
];
const STAKE_ADDRESS: &[(Field, usize)] = &[(Field::StakeAddress, 0)];

fn layout(tx: &Transaction<'_>) -> Option<Layout> {
    let neovm = tx.contract.kind == ContractKind::NeoVm;
    let name = tx.method.name;
    let layout = match name {
        b"transfer" | b"transferV2" => Layout {
            title: "Review transaction to send token",
            finish_title: "Sign transaction to send token?",
            fields: if neovm && name == b"transfer" {
                NEOVM_FROM_AMOUNT_TO
            } else {
                FROM_AMOUNT_TO
            },
        },
        b"transferFrom" | b"transferFromV2" => Layout {
            title: "Review transaction to transfer from others",
            finish_title: "Sign transaction to transfer from others?",
            fields: if neovm && name == b"transferFrom" {
                NEOVM_SPENDER_FROM_AMOUNT_TO
            } else {
                SPENDER_FROM_AMOUNT_TO
            },
        },
        b"approve" | b"approveV2" => Layout {
            title: "Review transaction to approve",
            finish_title: "Sign transaction to approve?",
            fields: if neovm && name == b"approve" {
                NEOVM_FROM_AMOUNT_TO
            } else {
                FROM_AMOUNT_TO
            },
        },
        b"registerCandidate" => Layout {
            title: "Review transaction to register a node",
            finish_title: "Sign transaction to register a node?",
            fields: &[
                (Field::PeerPubkey, 1),
                (Field::StakeAddress, 0),
                (Field::StakeAmount, 2),
            ],
        },
        b"quitNode" => Layout {
            title: "Review transaction to quit the node",
            finish_title: "Sign transaction to quit the node?",
            fields: &[(Field::PeerPubkey, 1), (Field::StakeAddress, 0)],
        },
        b"addInitPos" => Layout {
            title: "Review transaction to increase node stake",
            finish_title: "Sign transaction to increase node stake?",
            fields: &[
                (Field::PeerPubkey, 1),
                (Field::StakeAddress, 0),
                (Field::StakeAmount, 2),
            ],
        },
        b"reduceInitPos" => Layout {
            title: "Review transaction to reduce node stake",
            finish_title: "Sign transaction to reduce node stake?",
            fields: &[
                (Field::PeerPubkey, 1),
                (Field::StakeAddress, 0),
                (Field::Amount, 2),
            ],
        },
        b"changeMaxAuthorization" => Layout {
            title: "Review transaction to edit allowed user stake",
            finish_title: "Sign transaction to edit allowed user stake?",
            fields: &[
                (Field::PeerPubkey, 1),
                (Field::StakeAddress, 0),
                (Field::MaxAuthorize, 2),
            ],
        },
        b"setFeePercentage" => Layout {
            title: "Review transaction to edit incentive sharing ratio",
            finish_title: "Sign transaction to edit incentive sharing ratio?",
            fields: &[
                (Field::PeerPubkey, 1),
                (Field::StakeAddress, 0),
                (Field::PeerIncentive, 2),
                (Field::UserIncentive, 3),
            ],
        },
        b"authorizeForPeer" => Layout {
            title: "Review transaction to stake nodes",
            finish_title: "Sign transaction to stake nodes?",
            fields: STAKE_ADDRESS,
        },
        b"unAuthorizeForPeer" => Layout {
            title: "Review transaction to unstake nodes",
            finish_title: "Sign transaction to unstake nodes?",
            fields: STAKE_ADDRESS,
        },
        b"withdraw" => Layout {
            title: "Review transaction to withdraw unstaked token",
            finish_title: "Sign transaction to withdraw unstaked token?",
            fields: STAKE_ADDRESS,
        },
        b"withdrawFee" => Layout {
            title: "Review transaction to claim incentives",
            finish_title: "Sign transaction to claim incentives?",
            fields: STAKE_ADDRESS,
        },
        _ => return None,
    };
    Some(layout)
}

/// Rendering context passed through the pipeline.
struct RenderContext<'t, 'a> {
    tx: &'t Transaction<'a>,
    addresses: &'t dyn AddressEncoder,
    labels: &'static Labels,
}

impl RenderContext<'_, '_> {
    fn ticker(&self) -> &str {
        self.tx.contract.ticker.unwrap_or_default()
    }

    /// Text of the parameter in slot `idx`.
    fn param(&self, idx: usize) -> Result<String, Error> {
        let param = self
            .tx
            .method
            .params
            .get(idx)
            .ok_or_else(|| Error::Render(format!("missing parameter {idx}")))?;

        match param.kind {
            ParamKind::Address => {
                let address = param
                    .as_address()
                    .ok_or_else(|| Error::Render(format!("parameter {idx} is not an address")))?;
                self.addresses.encode(address)
            }
            ParamKind::Amount | ParamKind::UInt128 => {
                let has_prefix = self.tx.contract.kind != ContractKind::Wasm;
                let mut text = amount::format_param(param, self.tx.contract.decimals, has_prefix)?;
                if self.tx.method.is("setFeePercentage") {
                    text.push('%');
                } else {
                    text.push(' ');
                    text.push_str(self.ticker());
                }
                Ok(text)
            }
            ParamKind::PublicKey => std::str::from_utf8(param.bytes)
                .map(str::to_owned)
                .map_err(|_| Error::Render(format!("public key {idx} is not text"))),
        }
    }

    fn amount_u64(&self, idx: usize) -> Result<u64, Error> {
        self.tx
            .method
            .params
            .get(idx)
            .and_then(amount::to_u64)
            .ok_or_else(|| Error::Render(format!("parameter {idx} is not a 64-bit amount")))
    }
}

/// Build the review model for a decoded transaction.
///
/// `signer` is the already-encoded address of the signing account.
pub fn format_transaction(
    decoded: &Decoded<'_>,
    signer: &str,
    addresses: &dyn AddressEncoder,
    config: &Config,
) -> Result<DisplayModel, Error> {
    let tx = decoded.transaction();
    let ctx = RenderContext {
        tx,
        addresses,
        labels: if config.long_labels {
            &LONG_LABELS
        } else {
            &SHORT_LABELS
        },
    };

    let mut model = match decoded {
        Decoded::Blind(_) => blind_model(tx),
        Decoded::Clear(_) => clear_model(&ctx)?,
    };

    model.items.push(DisplayItem::new("Gas Fee", gas_fee(tx)?));
    model.items.push(DisplayItem::new("Signer", signer));
    Ok(model)
}

fn gas_fee(tx: &Transaction<'_>) -> Result<String, Error> {
    let fee = tx
        .header
        .fee()
        .ok_or_else(|| Error::Render("gas fee overflows".to_string()))?;
    let mut text = amount::format_u64(fee, ONG_DECIMALS)?;
    text.push(' ');
    text.push_str(ONG_TICKER);
    Ok(text)
}

fn blind_model(tx: &Transaction<'_>) -> DisplayModel {
    DisplayModel {
        title: "Blind sign transaction".to_string(),
        finish_title: "Accept risk and blind sign transaction?".to_string(),
        blind: true,
        items: vec![
            DisplayItem::new("Blind Signing Transaction", "Transaction cannot be verified!"),
            DisplayItem::new("Contract Address", hex::encode_upper(tx.contract.address)),
        ],
    }
}

fn clear_model(ctx: &RenderContext<'_, '_>) -> Result<DisplayModel, Error> {
    let tx = ctx.tx;
    let Some(layout) = layout(tx) else {
        debug!(method = %String::from_utf8_lossy(tx.method.name), "no display layout");
        return Err(Error::Render(format!(
            "no display layout for method '{}'",
            String::from_utf8_lossy(tx.method.name)
        )));
    };

    let mut items = place_fields(ctx, layout.fields, 0)?;

    if tx.contract.kind == ContractKind::Native {
        match tx.method.name {
            b"registerCandidate" => items.push(DisplayItem::new("Staking Fee", "500 ONG")),
            b"authorizeForPeer" => pk_amount_items(ctx, "Stake Amount", &mut items)?,
            b"unAuthorizeForPeer" => pk_amount_items(ctx, "Unstake Amount", &mut items)?,
            b"withdraw" => pk_amount_items(ctx, "Withdraw Amount", &mut items)?,
            b"transfer" | b"transferV2" => {
                // One From/Amount/To group per additional transfer state.
                let states = tx.method.params.len() / 3;
                for state in 1..states {
                    items.extend(place_fields(ctx, layout.fields, 3 * state)?);
                }
            }
            _ => {}
        }
    }

    Ok(DisplayModel {
        title: layout.title.to_string(),
        finish_title: layout.finish_title.to_string(),
        blind: false,
        items,
    })
}

/// Render `fields` for the slots starting at `base`, ordered by display position.
fn place_fields(
    ctx: &RenderContext<'_, '_>,
    fields: &[(Field, usize)],
    base: usize,
) -> Result<Vec<DisplayItem>, Error> {
    let mut placed: Vec<Option<DisplayItem>> = vec![None; fields.len()];
    for (i, &(field, pos)) in fields.iter().enumerate() {
        let slot = placed
            .get_mut(pos)
            .ok_or_else(|| Error::Render(format!("display position {pos} out of range")))?;
        *slot = Some(DisplayItem::new(field.label(ctx.labels), ctx.param(base + i)?));
    }
    placed
        .into_iter()
        .map(|item| item.ok_or_else(|| Error::Render("display position left empty".to_string())))
        .collect()
}

/// Public keys and amounts of a pk/amount list: slot 1 holds the count, then the keys,
/// then the amounts.
fn pk_amount_items(
    ctx: &RenderContext<'_, '_>,
    amount_label: &str,
    items: &mut Vec<DisplayItem>,
) -> Result<(), Error> {
    let count = ctx.amount_u64(1)?;
    if count == 0 {
        return Err(Error::Render("empty public key list".to_string()));
    }
    let n = usize::try_from(count).map_err(|e| Error::Render(e.to_string()))?;
    let pk_label = ctx.labels.peer_pubkey;

    for i in 0..n.min(MAX_PUBKEY_DISPLAY as usize) {
        let (pk, amount) = if count == 1 {
            (pk_label.to_string(), amount_label.to_string())
        } else {
            (format!("{pk_label} {}", i + 1), format!("{amount_label} {}", i + 1))
        };
        items.push(DisplayItem::new(pk, ctx.param(2 + i)?));
        if count <= MAX_PUBKEY_DISPLAY {
            items.push(DisplayItem::new(amount, ctx.param(2 + n + i)?));
        }
    }

    if count > MAX_PUBKEY_DISPLAY {
        items.push(DisplayItem::new(
            ctx.labels.node_amount,
            (count - MAX_PUBKEY_DISPLAY).to_string(),
        ));

        let mut total = 0u64;
        for i in 0..n {
            total = total
                .checked_add(ctx.amount_u64(2 + n + i)?)
                .ok_or_else(|| Error::Render("total amount overflows".to_string()))?;
        }
        let mut text = amount::format_u64(total, ctx.tx.contract.decimals)?;
        text.push(' ');
        text.push_str(ctx.ticker());
        items.push(DisplayItem::new(format!("Total {amount_label}"), text));
    }
    Ok(())
}
