//! ABIs for the contracts the bot calls.

use anyhow::Result;
use ethers::abi::{Abi, Token};
use ethers::types::{Address, Bytes, U256};

pub const ERC20_ABI: &str = r#"[
    {"constant":true,"inputs":[{"name":"_owner","type":"address"}],"name":"balanceOf","outputs":[{"name":"balance","type":"uint256"}],"type":"function"},
    {"constant":false,"inputs":[{"name":"_spender","type":"address"},{"name":"_value","type":"uint256"}],"name":"approve","outputs":[{"name":"","type":"bool"}],"type":"function"},
    {"constant":false,"inputs":[{"name":"_to","type":"address"},{"name":"_value","type":"uint256"}],"name":"transfer","outputs":[{"name":"","type":"bool"}],"type":"function"}
]"#;

pub const SWAP_ROUTER_ABI: &str = r#"[
    {"type":"function","name":"exactInputSingle","stateMutability":"payable",
     "inputs":[{"name":"params","type":"tuple","components":[
        {"name":"tokenIn","type":"address"},
        {"name":"tokenOut","type":"address"},
        {"name":"fee","type":"uint24"},
        {"name":"recipient","type":"address"},
        {"name":"deadline","type":"uint256"},
        {"name":"amountIn","type":"uint256"},
        {"name":"amountOutMinimum","type":"uint256"},
        {"name":"sqrtPriceLimitX96","type":"uint160"}
     ]}],
     "outputs":[{"name":"amountOut","type":"uint256"}]}
]"#;

pub fn erc20_abi() -> Result<Abi> {
    Ok(serde_json::from_str(ERC20_ABI)?)
}

pub fn swap_router_abi() -> Result<Abi> {
    Ok(serde_json::from_str(SWAP_ROUTER_ABI)?)
}

/// Parameters of a single-pool exact-input swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapParams {
    pub token_in: Address,
    pub token_out: Address,
    pub fee: u32,
    pub recipient: Address,
    pub deadline: U256,
    pub amount_in: U256,
    pub amount_out_minimum: U256,
    pub sqrt_price_limit_x96: U256,
}

impl SwapParams {
    fn to_token(&self) -> Token {
        Token::Tuple(vec![
            Token::Address(self.token_in),
            Token::Address(self.token_out),
            Token::Uint(U256::from(self.fee)),
            Token::Address(self.recipient),
            Token::Uint(self.deadline),
            Token::Uint(self.amount_in),
            Token::Uint(self.amount_out_minimum),
            Token::Uint(self.sqrt_price_limit_x96),
        ])
    }
}

pub fn encode_balance_of(abi: &Abi, owner: Address) -> Result<Bytes> {
    let data = abi.function("balanceOf")?.encode_input(&[Token::Address(owner)])?;
    Ok(data.into())
}

pub fn encode_approve(abi: &Abi, spender: Address, amount: U256) -> Result<Bytes> {
    let data = abi
        .function("approve")?
        .encode_input(&[Token::Address(spender), Token::Uint(amount)])?;
    Ok(data.into())
}

pub fn encode_transfer(abi: &Abi, to: Address, amount: U256) -> Result<Bytes> {
    let data = abi
        .function("transfer")?
        .encode_input(&[Token::Address(to), Token::Uint(amount)])?;
    Ok(data.into())
}

pub fn encode_exact_input_single(abi: &Abi, params: &SwapParams) -> Result<Bytes> {
    let data = abi
        .function("exactInputSingle")?
        .encode_input(&[params.to_token()])?;
    Ok(data.into())
}

pub fn decode_uint(abi: &Abi, function: &str, output: &[u8]) -> Result<U256> {
    let tokens = abi.function(function)?.decode_output(output)?;
    tokens
        .into_iter()
        .next()
        .and_then(Token::into_uint)
        .ok_or_else(|| anyhow::anyhow!("{} returned no uint", function))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors() {
        let erc20 = erc20_abi().unwrap();
        let router = swap_router_abi().unwrap();

        let transfer = encode_transfer(&erc20, Address::zero(), U256::one()).unwrap();
        assert_eq!(hex::encode(&transfer[..4]), "a9059cbb");

        let approve = encode_approve(&erc20, Address::zero(), U256::one()).unwrap();
        assert_eq!(hex::encode(&approve[..4]), "095ea7b3");

        let balance = encode_balance_of(&erc20, Address::zero()).unwrap();
        assert_eq!(hex::encode(&balance[..4]), "70a08231");

        let params = SwapParams {
            token_in: Address::repeat_byte(1),
            token_out: Address::repeat_byte(2),
            fee: 500,
            recipient: Address::repeat_byte(3),
            deadline: U256::from(1_700_000_000u64),
            amount_in: U256::exp10(15),
            amount_out_minimum: U256::zero(),
            sqrt_price_limit_x96: U256::zero(),
        };
        let swap = encode_exact_input_single(&router, &params).unwrap();
        assert_eq!(hex::encode(&swap[..4]), "414bf389");
        assert_eq!(swap.len(), 4 + 8 * 32);
    }

    #[test]
    fn test_decode_uint() {
        let erc20 = erc20_abi().unwrap();
        let mut word = [0u8; 32];
        word[31] = 42;
        assert_eq!(
            decode_uint(&erc20, "balanceOf", &word).unwrap(),
            U256::from(42)
        );
    }
}
