// HyPy - Hydra Chain RPC Toolkit
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Typed node client and the static dispatch table
//!
//! Every node method is declared once in [`node_methods!`], which generates both
//! a typed async method on [`NodeRpc`] and an entry in [`METHODS`]. Dispatch by
//! name goes through that table only, so an unsupported method fails before any
//! request is sent.

use crate::{
    client::RpcClient,
    error::{kind_of, RpcError},
    result::RpcResult,
    url::{NodeEndpoint, Network},
};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use std::{collections::HashMap, fmt};
use tracing::debug;

/// Method groups, as listed by the node's `help`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Chain, block and mempool queries
    Blockchain,
    /// Node control and introspection
    Control,
    /// Block generation (regtest)
    Generating,
    /// Mining and staking
    Mining,
    /// Peer and network management
    Network,
    /// Raw transaction helpers
    Rawtransactions,
    /// Address and signature utilities
    Util,
    /// Wallet operations
    Wallet,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Self; 8] = [
        Self::Blockchain,
        Self::Control,
        Self::Generating,
        Self::Mining,
        Self::Network,
        Self::Rawtransactions,
        Self::Util,
        Self::Wallet,
    ];

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blockchain => "blockchain",
            Self::Control => "control",
            Self::Generating => "generating",
            Self::Mining => "mining",
            Self::Network => "network",
            Self::Rawtransactions => "rawtransactions",
            Self::Util => "util",
            Self::Wallet => "wallet",
        }
    }

    /// Case-insensitive lookup by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON kind a positional parameter must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Anything
    Any,
    /// JSON string
    String,
    /// Integral JSON number
    Integer,
    /// Any JSON number
    Number,
    /// `true` / `false`
    Bool,
    /// Verbosity flag, either `true`/`false` or a level
    BoolOrInt,
    /// JSON array
    Array,
    /// JSON object
    Object,
}

impl ParamKind {
    /// Whether `value` fits this kind
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Bool => value.is_boolean(),
            Self::BoolOrInt => value.is_boolean() || value.is_u64(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::BoolOrInt => "bool or integer",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// Verbosity argument; the node takes both `true` and `1` for the same flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BoolOrInt {
    /// `true` / `false`
    Bool(bool),
    /// Verbosity level
    Int(u64),
}

impl From<bool> for BoolOrInt {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<u64> for BoolOrInt {
    fn from(level: u64) -> Self {
        Self::Int(level)
    }
}

/// Maps the Rust types used in typed methods to their [`ParamKind`]
pub trait ParamType: Serialize {
    /// Kind checked by dispatch
    const KIND: ParamKind;
}

macro_rules! param_kinds {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(impl ParamType for $ty {
            const KIND: ParamKind = ParamKind::$kind;
        })*
    };
}

param_kinds! {
    &str => String,
    String => String,
    u8 => Integer,
    u32 => Integer,
    u64 => Integer,
    i64 => Integer,
    f64 => Number,
    bool => Bool,
    BoolOrInt => BoolOrInt,
    Value => Any,
    Vec<String> => Array,
    Vec<Value> => Array,
}

/// One positional parameter of a method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Parameter name, as in the node's help
    pub name: &'static str,
    /// Expected JSON kind
    pub kind: ParamKind,
    /// Whether the parameter must be supplied
    pub required: bool,
}

/// Dispatch table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSpec {
    /// RPC method name
    pub name: &'static str,
    /// Method group
    pub category: Category,
    /// Positional parameters, required ones first
    pub params: &'static [ParamSpec],
}

impl MethodSpec {
    /// Number of required parameters
    pub fn required(&self) -> usize {
        self.params.iter().filter(|param| param.required).count()
    }

    /// Usage line, e.g. `getblock <blockhash> [verbosity]`
    pub fn signature(&self) -> String {
        let mut signature = self.name.to_string();
        for param in self.params {
            if param.required {
                signature.push_str(&format!(" <{}>", param.name));
            } else {
                signature.push_str(&format!(" [{}]", param.name));
            }
        }
        signature
    }

    /// Validate arity and kinds of already coerced parameters.
    ///
    /// `null` is accepted for optional parameters.
    pub fn check(&self, params: &[Value]) -> Result<(), RpcError> {
        if let Some(missing) = self.params.iter().filter(|p| p.required).nth(params.len()) {
            return Err(RpcError::parameter(
                missing.name,
                format!("missing required parameter, usage: {}", self.signature()),
            ));
        }

        if let Some(extra) = params.get(self.params.len()) {
            return Err(RpcError::parameter(
                extra.to_string(),
                format!("too many parameters, usage: {}", self.signature()),
            ));
        }

        for (spec, value) in self.params.iter().zip(params) {
            let skipped = !spec.required && value.is_null();
            if !skipped && !spec.kind.accepts(value) {
                return Err(RpcError::parameter(
                    spec.name,
                    format!("expected {}, got {}", spec.kind.as_str(), kind_of(value)),
                ));
            }
        }

        Ok(())
    }
}

/// Look up a method in [`METHODS`]
pub fn lookup(name: &str) -> Option<&'static MethodSpec> {
    static INDEX: Lazy<HashMap<&'static str, &'static MethodSpec>> =
        Lazy::new(|| METHODS.iter().map(|spec| (spec.name, spec)).collect());

    INDEX.get(name).copied()
}

/// Methods of one category, in table order
pub fn methods_in(category: Category) -> impl Iterator<Item = &'static MethodSpec> {
    METHODS.iter().filter(move |spec| spec.category == category)
}

fn to_param<T: Serialize + ?Sized>(name: &str, value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|err| RpcError::parameter(name, err))
}

fn to_optional_param<T: Serialize>(name: &str, value: Option<&T>) -> Result<Option<Value>, RpcError> {
    value.map(|value| to_param(name, value)).transpose()
}

/// Fill skipped optional slots that precede a supplied one, so later
/// parameters keep their position.
fn fill_gaps(params: &mut [Option<Value>], fills: &[Option<Value>]) {
    let Some(last) = params.iter().rposition(Option::is_some) else {
        return;
    };

    for (param, fill) in params[..last].iter_mut().zip(fills) {
        if param.is_none() {
            param.clone_from(fill);
        }
    }
}

macro_rules! fill_value {
    (@required $name:ident) => {
        None
    };
    () => {
        None
    };
    ($fill:expr) => {
        Some(Value::from($fill))
    };
}

macro_rules! node_methods {
    ($(
        $(#[doc = $doc:literal])*
        $category:ident fn $name:ident(
            $($req:ident: $rty:ty),* $(; $($opt:ident: $oty:ty $(= $fill:expr)?),+)?
        );
    )*) => {
        impl NodeRpc {
            $(
                #[doc = concat!("Calls `", stringify!($name), "`.")]
                $(#[doc = $doc])*
                #[allow(clippy::too_many_arguments)]
                pub async fn $name(
                    &self
                    $(, $req: $rty)*
                    $($(, $opt: Option<$oty>)+)?
                ) -> Result<RpcResult, RpcError> {
                    let mut params: Vec<Option<Value>> = vec![
                        $(Some(to_param(stringify!($req), &$req)?),)*
                        $($(to_optional_param(stringify!($opt), $opt.as_ref())?,)+)?
                    ];
                    let fills: Vec<Option<Value>> = vec![
                        $(fill_value!(@required $req),)*
                        $($(fill_value!($($fill)?),)+)?
                    ];
                    fill_gaps(&mut params, &fills);

                    self.client.call(stringify!($name), params).await
                }
            )*
        }

        /// Every method known to [`NodeRpc::dispatch`]
        pub static METHODS: &[MethodSpec] = &[
            $(
                MethodSpec {
                    name: stringify!($name),
                    category: Category::$category,
                    params: &[
                        $(ParamSpec {
                            name: stringify!($req),
                            kind: <$rty as ParamType>::KIND,
                            required: true,
                        },)*
                        $($(ParamSpec {
                            name: stringify!($opt),
                            kind: <$oty as ParamType>::KIND,
                            required: false,
                        },)+)?
                    ],
                },
            )*
        ];
    };
}

/// Client for a Hydra node: typed methods plus name-based dispatch
#[derive(Debug)]
pub struct NodeRpc {
    client: RpcClient,
    network: Network,
}

impl NodeRpc {
    /// Wrap a transport client
    pub fn new(client: RpcClient, network: Network) -> Self {
        Self { client, network }
    }

    /// Client for a resolved endpoint, optionally scoped to a wallet
    pub fn from_endpoint(endpoint: NodeEndpoint, wallet: Option<&str>) -> Result<Self, RpcError> {
        let client = RpcClient::builder(endpoint.url).maybe_wallet(wallet).build()?;
        Ok(Self::new(client, endpoint.network))
    }

    /// Underlying transport
    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    /// Network the endpoint belongs to
    pub fn network(&self) -> Network {
        self.network
    }

    /// Unchecked call of any method, including ones missing from [`METHODS`]
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<RpcResult, RpcError> {
        self.client.call(method, params.into_iter().map(Some)).await
    }

    /// Call a method from [`METHODS`] by name.
    ///
    /// Unknown names and parameters that do not fit the method fail before any
    /// request is made.
    pub async fn dispatch(&self, method: &str, params: Vec<Value>) -> Result<RpcResult, RpcError> {
        let spec = lookup(method).ok_or_else(|| RpcError::UnknownMethod(method.to_string()))?;
        spec.check(&params)?;

        debug!(method, category = %spec.category, "Dispatching");
        self.client.call(spec.name, params.into_iter().map(Some)).await
    }
}

node_methods! {
    // == Blockchain ==
    /// Read-only contract call.
    Blockchain fn callcontract(address: &str, data: &str; sender_address: &str = "", gas_limit: u64);
    Blockchain fn getaccountinfo(address: &str);
    Blockchain fn getbestblockhash();
    Blockchain fn getblock(blockhash: &str; verbosity: BoolOrInt);
    Blockchain fn getblockchaininfo();
    Blockchain fn getblockcount();
    Blockchain fn getblockhash(height: u64);
    Blockchain fn getblockheader(blockhash: &str; verbose: BoolOrInt);
    Blockchain fn getblockstats(hash_or_height: Value; stats: Vec<String>);
    Blockchain fn getchaintips();
    Blockchain fn getchaintxstats(; nblocks: u64 = Value::Null, blockhash: &str);
    Blockchain fn getcontractcode(address: &str);
    Blockchain fn getdifficulty();
    Blockchain fn getestimatedannualroi();
    Blockchain fn getmempoolancestors(txid: &str; verbose: BoolOrInt);
    Blockchain fn getmempooldescendants(txid: &str; verbose: BoolOrInt);
    Blockchain fn getmempoolentry(txid: &str);
    Blockchain fn getmempoolinfo();
    Blockchain fn getrawmempool(; verbose: BoolOrInt);
    Blockchain fn getstorage(address: &str; block_num: i64 = -1, index: u64);
    Blockchain fn gettransactionreceipt(hash: &str);
    Blockchain fn gettxout(txid: &str, n: u32; include_mempool: bool);
    Blockchain fn gettxoutproof(txids: Vec<String>; blockhash: &str);
    Blockchain fn gettxoutsetinfo();
    Blockchain fn listcontracts(; start: u64 = 1, max_display: u64);
    Blockchain fn preciousblock(blockhash: &str);
    Blockchain fn pruneblockchain(height: u64);
    Blockchain fn savemempool();
    Blockchain fn scantxoutset(action: &str, scanobjects: Vec<Value>);
    /// Event logs between two heights.
    Blockchain fn searchlogs(from_block: i64, to_block: i64; address: Value = Value::Null, topics: Value = Value::Null, minconf: u32);
    Blockchain fn verifychain(; checklevel: u32 = 3, nblocks: u32);
    Blockchain fn verifytxoutproof(proof: &str);
    /// Blocks until matching logs appear.
    Blockchain fn waitforlogs(; from_block: i64 = Value::Null, to_block: i64 = Value::Null, filter: Value = Value::Null, minconf: u32);

    // == Control ==
    Control fn getdgpinfo();
    Control fn getinfo();
    Control fn getmemoryinfo(; mode: &str);
    Control fn getoracleinfo();
    Control fn getrpcinfo();
    Control fn help(; command: &str);
    Control fn logging(; include: Vec<String> = Value::Array(vec![]), exclude: Vec<String>);
    Control fn stop();
    Control fn uptime();

    // == Generating ==
    Generating fn generate(nblocks: u32; maxtries: u64);
    Generating fn generatetoaddress(nblocks: u32, address: &str; maxtries: u64);

    // == Mining ==
    Mining fn getblocktemplate(; template_request: Value);
    Mining fn getmininginfo();
    Mining fn getnetworkhashps(; nblocks: i64 = 120, height: i64);
    Mining fn getstakinginfo();
    Mining fn submitblock(hexdata: &str; dummy: &str);
    Mining fn submitheader(hexdata: &str);

    // == Network ==
    Network fn addnode(node: &str, command: &str);
    Network fn clearbanned();
    /// Disconnect by address, or by node id with an empty address.
    Network fn disconnectnode(; address: &str = "", nodeid: u64);
    Network fn getaddednodeinfo(; node: &str);
    Network fn getconnectioncount();
    Network fn getnettotals();
    Network fn getnetworkinfo();
    Network fn getnodeaddresses(; count: u32);
    Network fn getpeerinfo();
    Network fn listbanned();
    Network fn ping();
    Network fn setban(subnet: &str, command: &str; bantime: u64 = 0, absolute: bool);
    Network fn setnetworkactive(state: bool);

    // == Rawtransactions ==
    Rawtransactions fn decoderawtransaction(hexstring: &str; iswitness: bool);
    Rawtransactions fn fromhexaddress(hexaddress: &str);
    Rawtransactions fn gethexaddress(address: &str);
    Rawtransactions fn getrawtransaction(txid: &str; verbose: BoolOrInt = false, blockhash: &str);
    Rawtransactions fn sendrawtransaction(hexstring: &str; maxfeerate: Value);

    // == Util ==
    Util fn createmultisig(nrequired: u32, keys: Vec<String>; address_type: &str);
    Util fn deriveaddresses(descriptor: &str; range: Value);
    Util fn estimatesmartfee(conf_target: u32; estimate_mode: &str);
    Util fn getdescriptorinfo(descriptor: &str);
    Util fn signmessagewithprivatekey(privkey: &str, message: &str);
    Util fn validateaddress(address: &str);
    Util fn verifymessage(address: &str, signature: &str, message: &str);

    // == Wallet ==
    Wallet fn addmultisigaddress(nrequired: u32, keys: Vec<String>; label: &str = "", address_type: &str);
    Wallet fn backupwallet(destination: &str);
    /// Deploy a contract from wallet funds.
    Wallet fn createcontract(bytecode: &str; gas_limit: u64 = 2500000, senderaddress: &str = "", broadcast: bool = true, change_to_sender: bool);
    Wallet fn createwallet(wallet_name: &str; disable_private_keys: bool = false, blank: bool);
    Wallet fn dumpprivkey(address: &str);
    Wallet fn dumpwallet(filename: &str);
    Wallet fn encryptwallet(passphrase: &str);
    Wallet fn getaddressesbylabel(label: &str);
    Wallet fn getaddressinfo(address: &str);
    Wallet fn getbalance(; dummy: &str = "*", minconf: u32 = 0, include_watchonly: bool);
    Wallet fn getbalanceofaddress(address: &str);
    Wallet fn getnewaddress(; label: &str = "", address_type: &str);
    Wallet fn getrawchangeaddress(; address_type: &str);
    Wallet fn getreceivedbyaddress(address: &str; minconf: u32);
    Wallet fn getreceivedbylabel(label: &str; minconf: u32);
    Wallet fn gettransaction(txid: &str; include_watchonly: bool = false, waitconf: u32);
    Wallet fn getunconfirmedbalance();
    Wallet fn getwalletinfo();
    Wallet fn importaddress(address: &str; label: &str = "", rescan: bool = true, p2sh: bool);
    Wallet fn importmulti(requests: Value; options: Value);
    Wallet fn importprivkey(privkey: &str; label: &str = "", rescan: bool);
    Wallet fn importprunedfunds(rawtransaction: &str, txoutproof: &str);
    Wallet fn importpubkey(pubkey: &str; label: &str = "", rescan: bool);
    Wallet fn importwallet(filename: &str);
    Wallet fn keypoolrefill(; newsize: u32);
    Wallet fn listaddressgroupings();
    Wallet fn listlabels(; purpose: &str);
    Wallet fn listlockunspent();
    Wallet fn listreceivedbyaddress(; minconf: u32 = 1, include_empty: bool = false, include_watchonly: bool = false, address_filter: &str);
    Wallet fn listreceivedbylabel(; minconf: u32 = 1, include_empty: bool = false, include_watchonly: bool);
    Wallet fn listsinceblock(blockhash: &str; target_confirmations: u32 = 1, include_watchonly: bool = false, include_removed: bool);
    Wallet fn listtransactions(; label: &str = "*", count: u32 = 10, skip: u32 = 0, include_watchonly: bool);
    Wallet fn listunspent(; minconf: u32 = 1, maxconf: u32 = 9999999, addresses: Vec<String> = Value::Array(vec![]), include_unsafe: bool = true, query_options: Value);
    Wallet fn listwalletdir();
    Wallet fn listwallets();
    Wallet fn loadwallet(filename: &str);
    Wallet fn lockunspent(unlock: bool; outputs: Value);
    Wallet fn removeprunedfunds(txid: &str);
    Wallet fn rescanblockchain(; start_height: u64 = 0, stop_height: u64);
    Wallet fn reservebalance(; reserve: bool = false, amount: f64);
    /// Send coins; `amount` may be a number or a decimal string.
    Wallet fn sendtoaddress(address: &str, amount: Value; comment: &str = "", comment_to: &str = "", subtractfeefromamount: bool = false, replaceable: bool = false, conf_target: Value = Value::Null, estimate_mode: &str = "UNSET", senderaddress: &str = "", change_to_sender: bool);
    Wallet fn sendtocontract(contractaddress: &str, datahex: &str; amount: Value = 0, gas_limit: u64 = 250000, senderaddress: &str = "", broadcast: bool = true, change_to_sender: bool);
    Wallet fn sethdseed(; newkeypool: bool = true, seed: &str);
    Wallet fn setlabel(address: &str, label: &str);
    Wallet fn settxfee(amount: Value);
    Wallet fn signmessage(address: &str, message: &str);
    Wallet fn signrawsendertransactionwithwallet(hexstring: &str; sighashtype: &str);
    Wallet fn signrawtransactionwithwallet(hexstring: &str; prevtxs: Value = Value::Array(vec![]), sighashtype: &str);
    Wallet fn unloadwallet(; wallet_name: &str);
    Wallet fn walletlock();
    Wallet fn walletpassphrase(passphrase: &str, timeout: u64; staking_only: bool);
    Wallet fn walletpassphrasechange(oldpassphrase: &str, newpassphrase: &str);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_table_names_are_unique() {
        let names: HashSet<_> = METHODS.iter().map(|spec| spec.name).collect();
        assert_eq!(names.len(), METHODS.len());
    }

    #[test]
    fn test_required_params_come_first() {
        for spec in METHODS {
            let first_optional = spec.params.iter().position(|p| !p.required);
            if let Some(index) = first_optional {
                assert!(
                    spec.params[index..].iter().all(|p| !p.required),
                    "{} has a required parameter after an optional one",
                    spec.name
                );
            }
        }
    }

    #[test]
    fn test_lookup_and_signature() {
        let spec = lookup("getblock").unwrap();
        assert_eq!(spec.category, Category::Blockchain);
        assert_eq!(spec.required(), 1);
        assert_eq!(spec.signature(), "getblock <blockhash> [verbosity]");

        assert!(lookup("getblocks").is_none());
        assert_eq!(lookup("getblockcount").unwrap().signature(), "getblockcount");
    }

    #[test]
    fn test_check_arity() {
        let spec = lookup("getblockhash").unwrap();

        assert!(spec.check(&[json!(10)]).is_ok());
        assert!(matches!(
            spec.check(&[]),
            Err(RpcError::Parameter { ref token, .. }) if token == "height"
        ));
        assert!(matches!(
            spec.check(&[json!(10), json!(11)]),
            Err(RpcError::Parameter { ref token, .. }) if token == "11"
        ));
    }

    #[test]
    fn test_check_kinds() {
        let spec = lookup("getblock").unwrap();

        assert!(spec.check(&[json!("00ab"), json!(2)]).is_ok());
        assert!(spec.check(&[json!("00ab"), Value::Null]).is_ok());
        assert!(spec.check(&[json!(123)]).is_err());
        assert!(spec.check(&[json!("00ab"), json!("2")]).is_err());

        let any = lookup("getblockstats").unwrap();
        assert!(any.check(&[json!(100)]).is_ok());
        assert!(any.check(&[json!("00ab"), json!(["height"])]).is_ok());
    }

    #[test]
    fn test_check_verbose_flags_take_bool_or_int() {
        let rawtx = lookup("getrawtransaction").unwrap();
        assert_eq!(rawtx.params[1].kind, ParamKind::BoolOrInt);
        assert!(rawtx.check(&[json!("abcd"), json!(1)]).is_ok());
        assert!(rawtx.check(&[json!("abcd"), json!(true)]).is_ok());
        assert!(rawtx.check(&[json!("abcd"), json!(-1)]).is_err());

        let block = lookup("getblock").unwrap();
        assert!(block.check(&[json!("00ab"), json!(true)]).is_ok());
        assert!(block.check(&[json!("00ab"), json!(0)]).is_ok());
        assert!(block.check(&[json!("00ab"), json!("true")]).is_err());

        for name in ["getblockheader", "getmempoolancestors", "getmempooldescendants", "getrawmempool"] {
            let spec = lookup(name).unwrap();
            assert!(spec.params.iter().any(|param| param.kind == ParamKind::BoolOrInt), "{name}");
        }
    }

    #[test]
    fn test_fill_gaps_only_before_supplied_params() {
        let fills = [None, None, Some(json!("")), None];

        let mut params = vec![Some(json!("a")), Some(json!("d")), None, Some(json!(10))];
        fill_gaps(&mut params, &fills);
        assert_eq!(params[2], Some(json!("")));

        let mut params = vec![Some(json!("a")), Some(json!("d")), None, None];
        fill_gaps(&mut params, &fills);
        assert_eq!(params, vec![Some(json!("a")), Some(json!("d")), None, None]);
    }

    #[test]
    fn test_categories() {
        assert_eq!(Category::from_name("Wallet"), Some(Category::Wallet));
        assert_eq!(Category::from_name("nope"), None);
        assert!(methods_in(Category::Network).any(|spec| spec.name == "getpeerinfo"));
        assert!(Category::ALL.iter().all(|category| methods_in(*category).next().is_some()));
    }
}
