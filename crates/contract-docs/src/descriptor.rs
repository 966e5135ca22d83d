// crates/contract-docs/src/descriptor.rs
// ============================================================================
// Module: Contract Descriptors
// Description: Strict contract record normalized from contract directory JSON.
// Purpose: Resolve loose, optional JSON fields once at the load boundary.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Contract directory entries are loosely typed: most fields are optional,
//! address maps may hold nulls, origin addresses are either bare strings or
//! `{ originChain, address }` objects, and function signatures are strings or
//! `{ signature }` objects. [`ContractDescriptor::from_value`] collapses all of
//! that into a strict record so the renderer only asks "is this set".
//!
//! ## Invariants
//! - Map entries keep the key order of the source JSON.
//! - Empty strings, `null`, `false` and `0` count as absent, except for `name`
//!   and `path`, which keep empty strings because they are interpolated raw.
//! - [`Network`] and [`OriginChain`] are closed sets with an `Unknown` variant;
//!   unknown values never resolve to an explorer link.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Placeholder interpolated where `name` or `path` is missing.
pub const MISSING_VALUE: &str = "undefined";
/// Title used when a descriptor has no name.
pub const UNKNOWN_CONTRACT_TITLE: &str = "Unknown Contract";
/// Context used when a descriptor has none.
pub const DEFAULT_CONTEXT: &str = "general";

// ============================================================================
// SECTION: Networks
// ============================================================================

/// Destination networks with a known block explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    /// Katana mainnet.
    Katana,
    /// Tatara testnet.
    Tatara,
    /// Bokuto testnet.
    Bokuto,
    /// Any other network label.
    Unknown,
}

impl Network {
    /// Parses a network label case-insensitively.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "katana" => Self::Katana,
            "tatara" => Self::Tatara,
            "bokuto" => Self::Bokuto,
            _ => Self::Unknown,
        }
    }

    /// Returns the explorer page for `address` on this network.
    #[must_use]
    pub fn explorer_url(self, address: &str) -> Option<String> {
        let base = match self {
            Self::Tatara => "https://explorer.tatara.katana.network",
            Self::Bokuto => "https://explorer-bokuto.katanarpc.com",
            Self::Katana => "https://katanascan.com",
            Self::Unknown => return None,
        };
        Some(format!("{base}/address/{address}"))
    }

    /// Returns the chain assets on this network are bridged from.
    #[must_use]
    pub const fn inferred_origin_chain(self) -> OriginChain {
        match self {
            Self::Katana | Self::Unknown => OriginChain::Ethereum,
            Self::Tatara | Self::Bokuto => OriginChain::Sepolia,
        }
    }
}

/// Origin chains with a known block explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginChain {
    /// Ethereum mainnet.
    Ethereum,
    /// Sepolia testnet.
    Sepolia,
    /// Any other chain label.
    Unknown,
}

impl OriginChain {
    /// Parses an origin chain label case-insensitively.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "ethereum" => Self::Ethereum,
            "sepolia" => Self::Sepolia,
            _ => Self::Unknown,
        }
    }

    /// Returns the canonical chain label, if the chain is known.
    #[must_use]
    pub const fn as_str(self) -> Option<&'static str> {
        match self {
            Self::Ethereum => Some("ethereum"),
            Self::Sepolia => Some("sepolia"),
            Self::Unknown => None,
        }
    }

    /// Returns the explorer page for `address` on this chain.
    #[must_use]
    pub fn explorer_url(self, address: &str) -> Option<String> {
        let base = match self {
            Self::Ethereum => "https://etherscan.io",
            Self::Sepolia => "https://sepolia.etherscan.io",
            Self::Unknown => return None,
        };
        Some(format!("{base}/address/{address}"))
    }
}

// ============================================================================
// SECTION: Descriptor Types
// ============================================================================

/// Strict contract record used by the renderer and the output layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractDescriptor {
    /// Contract name; `Some("")` is kept distinct from missing.
    pub name: Option<String>,
    /// Name used as the page title; `None` when the source name is falsy
    /// (`false`, `0`, `""`, or missing).
    pub display_name: Option<String>,
    /// Source location label; `Some("")` is kept distinct from missing.
    pub path: Option<String>,
    /// Directory, relative to the output root, mirroring the source tree.
    pub relative_path: Option<String>,
    /// Human description for the frontmatter.
    pub description: Option<String>,
    /// Context label (defaults to `general` when rendered).
    pub context: Option<String>,
    /// NatSpec-style metadata.
    pub metadata: DescriptorMetadata,
    /// Deployed addresses keyed by network, in source order.
    pub addresses: Vec<NetworkAddress>,
    /// Origin-chain addresses keyed by destination network, in source order.
    pub origin_addresses: Vec<OriginAddress>,
    /// Contract ABI as read.
    pub abi: Option<Value>,
    /// Non-empty function signatures, in source order.
    pub function_signatures: Vec<String>,
}

/// NatSpec-style metadata attached to a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorMetadata {
    /// Tags in source order.
    pub tags: Vec<String>,
    /// `@title` text.
    pub title: Option<String>,
    /// `@notice` text.
    pub notice: Option<String>,
    /// `@dev` text.
    pub dev: Option<String>,
}

impl DescriptorMetadata {
    /// Returns true when any of title, notice, or dev is set.
    #[must_use]
    pub const fn has_natspec(&self) -> bool {
        self.title.is_some() || self.notice.is_some() || self.dev.is_some()
    }
}

/// A contract address deployed on a destination network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkAddress {
    /// Network label exactly as it appeared in the source.
    pub label: String,
    /// Parsed network.
    pub network: Network,
    /// Non-empty address text.
    pub address: String,
}

/// The canonical address of a bridged asset on its origin chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginAddress {
    /// Destination network label exactly as it appeared in the source.
    pub network_label: String,
    /// Origin chain label (explicit, or inferred from the network).
    pub chain_label: String,
    /// Parsed origin chain.
    pub chain: OriginChain,
    /// Address on the origin chain; may be empty for partial object entries.
    pub address: String,
}

/// Loose shape of a contract directory entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDescriptor {
    /// Contract name.
    #[serde(default)]
    name: Option<Value>,
    /// Source location label.
    #[serde(default)]
    path: Option<Value>,
    /// Output directory relative to the output root.
    #[serde(default)]
    relative_path: Option<Value>,
    /// Description text.
    #[serde(default)]
    description: Option<Value>,
    /// Context label.
    #[serde(default)]
    context: Option<Value>,
    /// Metadata object.
    #[serde(default)]
    metadata: Option<Value>,
    /// Network to address map.
    #[serde(default)]
    addresses: Option<Value>,
    /// Network to origin address map.
    #[serde(default)]
    origin_addresses: Option<Value>,
    /// ABI value.
    #[serde(default)]
    abi: Option<Value>,
    /// Function signature list.
    #[serde(default)]
    function_signatures: Option<Value>,
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

impl ContractDescriptor {
    /// Normalizes one contract directory entry.
    ///
    /// # Errors
    ///
    /// Returns a reason when the entry is not a JSON object.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        if !value.is_object() {
            return Err(String::from("expected a JSON object"));
        }
        let raw = RawDescriptor::deserialize(value).map_err(|err| err.to_string())?;
        let metadata = raw.metadata.as_ref().and_then(Value::as_object);
        Ok(Self {
            name: raw.name.as_ref().and_then(scalar_text),
            display_name: raw.name.as_ref().and_then(truthy_text),
            path: raw.path.as_ref().and_then(scalar_text),
            relative_path: raw.relative_path.as_ref().and_then(truthy_text),
            description: raw.description.as_ref().and_then(truthy_text),
            context: raw.context.as_ref().and_then(truthy_text),
            metadata: metadata.map(normalize_metadata).unwrap_or_default(),
            addresses: raw
                .addresses
                .as_ref()
                .and_then(Value::as_object)
                .map(normalize_addresses)
                .unwrap_or_default(),
            origin_addresses: raw
                .origin_addresses
                .as_ref()
                .and_then(Value::as_object)
                .map(normalize_origin_addresses)
                .unwrap_or_default(),
            abi: raw.abi.filter(is_truthy),
            function_signatures: raw
                .function_signatures
                .as_ref()
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .map(normalize_signatures)
                .unwrap_or_default(),
        })
    }

    /// Returns the page title (name, or the unknown-contract placeholder).
    #[must_use]
    pub fn title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(UNKNOWN_CONTRACT_TITLE)
    }

    /// Returns the name as interpolated into text (`undefined` when missing).
    #[must_use]
    pub fn name_text(&self) -> &str {
        self.name.as_deref().unwrap_or(MISSING_VALUE)
    }

    /// Returns the path as interpolated into text (`undefined` when missing).
    #[must_use]
    pub fn path_text(&self) -> &str {
        self.path.as_deref().unwrap_or(MISSING_VALUE)
    }

    /// Returns the description, synthesizing one from name and path.
    #[must_use]
    pub fn description_text(&self) -> String {
        self.description.clone().unwrap_or_else(|| {
            format!("Documentation for {} at {}", self.name_text(), self.path_text())
        })
    }

    /// Returns the context label, defaulting to `general`.
    #[must_use]
    pub fn context_text(&self) -> &str {
        self.context.as_deref().unwrap_or(DEFAULT_CONTEXT)
    }
}

/// Normalizes the metadata object.
fn normalize_metadata(metadata: &Map<String, Value>) -> DescriptorMetadata {
    let tags: Vec<String> = metadata
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| tags.iter().filter_map(scalar_text).collect())
        .unwrap_or_default();
    DescriptorMetadata {
        tags,
        title: metadata.get("title").and_then(truthy_text),
        notice: metadata.get("notice").and_then(truthy_text),
        dev: metadata.get("dev").and_then(truthy_text),
    }
}

/// Normalizes the network to address map, dropping empty entries.
fn normalize_addresses(addresses: &Map<String, Value>) -> Vec<NetworkAddress> {
    addresses
        .iter()
        .filter_map(|(label, value)| {
            let address = truthy_text(value)?;
            Some(NetworkAddress {
                label: label.clone(),
                network: Network::parse(label),
                address,
            })
        })
        .collect()
}

/// Normalizes the origin address map into `{ chain, address }` pairs.
fn normalize_origin_addresses(entries: &Map<String, Value>) -> Vec<OriginAddress> {
    entries
        .iter()
        .filter(|(_, value)| is_truthy(value))
        .map(|(label, value)| {
            let inferred = Network::parse(label).inferred_origin_chain();
            let (chain_label, address) = match value {
                Value::Object(entry) => (
                    entry.get("originChain").and_then(truthy_text),
                    entry.get("address").and_then(truthy_text).unwrap_or_default(),
                ),
                other => (None, scalar_text(other).unwrap_or_default()),
            };
            let chain_label = chain_label
                .or_else(|| inferred.as_str().map(str::to_string))
                .unwrap_or_default();
            OriginAddress {
                network_label: label.clone(),
                chain: OriginChain::parse(&chain_label),
                chain_label,
                address,
            }
        })
        .collect()
}

/// Resolves signature entries, skipping empty ones.
fn normalize_signatures(entries: &[Value]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::Object(object) => object.get("signature").and_then(truthy_text),
            other => other.as_str().filter(|text| !text.is_empty()).map(str::to_string),
        })
        .collect()
}

/// Renders a JSON scalar as text; containers and `null` have no text form.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Renders a JSON scalar as text only when it is truthy.
fn truthy_text(value: &Value) -> Option<String> {
    if is_truthy(value) { scalar_text(value) } else { None }
}

/// Mirrors JSON truthiness: `null`, `false`, `0`, and `""` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|value| value != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
