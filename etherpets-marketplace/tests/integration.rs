use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{
    coin, coins, from_json, to_json_binary, Addr, BankMsg, CosmosMsg, MemoryStorage, OwnedDeps,
    Response, Uint128, WasmMsg,
};
use cw721::receiver::Cw721ReceiveMsg;
use cw_multi_test::{App, ContractWrapper, Executor};

use etherpets_marketplace::contract::*;
use etherpets_marketplace::error::ContractError;
use etherpets_marketplace::helpers::fee_for;
use etherpets_marketplace::msg::*;
use etherpets_marketplace::state::{Config, Listing};
use etherpets_pet_nft::msg::ExecuteMsg as PetExecuteMsg;

type Deps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

const DENOM: &str = "upet";

fn a(deps: &Deps, name: &str) -> Addr {
    deps.api.addr_make(name)
}

fn setup_with_fee(fee_bps: u16) -> Deps {
    let mut deps = mock_dependencies();
    let owner = deps.api.addr_make("owner");
    let pets = deps.api.addr_make("pets");
    let treasury = deps.api.addr_make("treasury");

    let msg = InstantiateMsg {
        owner: owner.to_string(),
        pet_contract: pets.to_string(),
        denom: DENOM.to_string(),
        fee_bps,
        treasury: treasury.to_string(),
    };
    instantiate(deps.as_mut(), mock_env(), message_info(&owner, &[]), msg).unwrap();
    deps
}

fn setup() -> Deps {
    setup_with_fee(250)
}

fn receive_msg(seller: &Addr, token_id: &str, price: u128) -> ExecuteMsg {
    ExecuteMsg::ReceiveNft(Cw721ReceiveMsg {
        sender: seller.to_string(),
        token_id: token_id.to_string(),
        msg: to_json_binary(&ReceiveMsg::ListPet {
            price: Uint128::new(price),
        })
        .unwrap(),
    })
}

fn list(deps: &mut Deps, seller: &str, token_id: &str, price: u128) -> Result<Response, ContractError> {
    let pets = a(deps, "pets");
    let seller = a(deps, seller);
    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&pets, &[]),
        receive_msg(&seller, token_id, price),
    )
}

fn buy(deps: &mut Deps, buyer: &str, token_id: &str, funds: &[cosmwasm_std::Coin]) -> Result<Response, ContractError> {
    let buyer = a(deps, buyer);
    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&buyer, funds),
        ExecuteMsg::Buy {
            token_id: token_id.to_string(),
        },
    )
}

fn listing(deps: &Deps, token_id: &str) -> Option<Listing> {
    from_json(
        query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::Listing {
                token_id: token_id.to_string(),
            },
        )
        .unwrap(),
    )
    .unwrap()
}

fn transfer_msg(deps: &Deps, token_id: &str, recipient: &Addr) -> CosmosMsg {
    CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: a(deps, "pets").to_string(),
        msg: to_json_binary(&PetExecuteMsg::TransferNft {
            recipient: recipient.to_string(),
            token_id: token_id.to_string(),
        })
        .unwrap(),
        funds: vec![],
    })
}

#[test]
fn test_instantiate() {
    let deps = setup();
    let config: Config = from_json(query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap()).unwrap();
    assert_eq!(config.pet_contract, a(&deps, "pets"));
    assert_eq!(config.fee_bps, 250);
    assert_eq!(config.treasury, a(&deps, "treasury"));
    assert!(!config.paused);
}

#[test]
fn test_fee_above_maximum_rejected() {
    let mut deps = mock_dependencies();
    let owner = deps.api.addr_make("owner");
    let msg = InstantiateMsg {
        owner: owner.to_string(),
        pet_contract: owner.to_string(),
        denom: DENOM.to_string(),
        fee_bps: 10_001,
        treasury: owner.to_string(),
    };
    let err = instantiate(deps.as_mut(), mock_env(), message_info(&owner, &[]), msg).unwrap_err();
    assert_eq!(err, ContractError::InvalidFee { fee_bps: 10_001 });
}

#[test]
fn test_fee_rounds_down() {
    assert_eq!(fee_for(Uint128::new(1_000), 250).unwrap(), Uint128::new(25));
    assert_eq!(fee_for(Uint128::new(39), 250).unwrap(), Uint128::zero());
    assert_eq!(fee_for(Uint128::new(1_000), 10_000).unwrap(), Uint128::new(1_000));
    assert_eq!(fee_for(Uint128::new(1_000), 0).unwrap(), Uint128::zero());
    assert_eq!(fee_for(Uint128::MAX, 2).unwrap_err(), ContractError::Overflow);
}

#[test]
fn test_list_pet() {
    let mut deps = setup();
    let res = list(&mut deps, "alice", "1", 1_000).unwrap();
    assert!(res.attributes.iter().any(|at| at.key == "action" && at.value == "list_pet"));

    let l = listing(&deps, "1").unwrap();
    assert_eq!(l.seller, a(&deps, "alice"));
    assert_eq!(l.price, Uint128::new(1_000));
    assert_eq!(l.listed_at, mock_env().block.time);
}

#[test]
fn test_list_only_from_pet_contract() {
    let mut deps = setup();
    let stranger = a(&deps, "other_nft");
    let alice = a(&deps, "alice");
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&stranger, &[]),
        receive_msg(&alice, "1", 100),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::UnknownNftContract {
            expected: a(&deps, "pets").to_string()
        }
    );
    assert!(listing(&deps, "1").is_none());
}

#[test]
fn test_list_zero_price_rejected() {
    let mut deps = setup();
    assert_eq!(list(&mut deps, "alice", "1", 0).unwrap_err(), ContractError::ZeroPrice);
}

#[test]
fn test_buy_pays_seller_and_treasury() {
    let mut deps = setup();
    list(&mut deps, "alice", "1", 1_000).unwrap();

    let res = buy(&mut deps, "bob", "1", &coins(1_000, DENOM)).unwrap();
    let bob = a(&deps, "bob");
    assert_eq!(res.messages.len(), 3);
    assert_eq!(res.messages[0].msg, transfer_msg(&deps, "1", &bob));
    assert_eq!(
        res.messages[1].msg,
        CosmosMsg::Bank(BankMsg::Send {
            to_address: a(&deps, "alice").to_string(),
            amount: coins(975, DENOM),
        })
    );
    assert_eq!(
        res.messages[2].msg,
        CosmosMsg::Bank(BankMsg::Send {
            to_address: a(&deps, "treasury").to_string(),
            amount: coins(25, DENOM),
        })
    );
    assert!(listing(&deps, "1").is_none());

    let err = buy(&mut deps, "carol", "1", &coins(1_000, DENOM)).unwrap_err();
    assert_eq!(
        err,
        ContractError::ListingNotFound {
            token_id: "1".to_string()
        }
    );
}

#[test]
fn test_buy_without_fee() {
    let mut deps = setup_with_fee(0);
    list(&mut deps, "alice", "7", 40).unwrap();
    let res = buy(&mut deps, "bob", "7", &coins(40, DENOM)).unwrap();
    assert_eq!(res.messages.len(), 2);
    assert!(res.attributes.iter().any(|at| at.key == "fee" && at.value == "0"));
}

#[test]
fn test_buy_requires_exact_payment() {
    let mut deps = setup();
    list(&mut deps, "alice", "1", 1_000).unwrap();

    assert_eq!(buy(&mut deps, "bob", "1", &[]).unwrap_err(), ContractError::NoFundsSent);
    assert_eq!(
        buy(&mut deps, "bob", "1", &coins(999, DENOM)).unwrap_err(),
        ContractError::WrongAmount {
            expected: "1000".to_string(),
            got: "999".to_string()
        }
    );
    assert_eq!(
        buy(&mut deps, "bob", "1", &coins(1_000, "uatom")).unwrap_err(),
        ContractError::WrongDenom {
            expected: DENOM.to_string(),
            got: "uatom".to_string()
        }
    );
    assert_eq!(
        buy(&mut deps, "bob", "1", &[coin(1_000, DENOM), coin(1, "uatom")]).unwrap_err(),
        ContractError::MultipleDenomsSent
    );
    assert!(listing(&deps, "1").is_some());
}

#[test]
fn test_seller_cannot_buy_own_listing() {
    let mut deps = setup();
    list(&mut deps, "alice", "1", 1_000).unwrap();
    assert_eq!(
        buy(&mut deps, "alice", "1", &coins(1_000, DENOM)).unwrap_err(),
        ContractError::CannotBuyOwnListing
    );
}

#[test]
fn test_cancel_listing_returns_pet() {
    let mut deps = setup();
    list(&mut deps, "alice", "1", 1_000).unwrap();

    let bob = a(&deps, "bob");
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&bob, &[]),
        ExecuteMsg::CancelListing {
            token_id: "1".to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            role: "seller".to_string()
        }
    );

    let alice = a(&deps, "alice");
    let res = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&alice, &[]),
        ExecuteMsg::CancelListing {
            token_id: "1".to_string(),
        },
    )
    .unwrap();
    assert_eq!(res.messages.len(), 1);
    assert_eq!(res.messages[0].msg, transfer_msg(&deps, "1", &alice));
    assert!(listing(&deps, "1").is_none());
}

#[test]
fn test_update_price() {
    let mut deps = setup();
    list(&mut deps, "alice", "1", 1_000).unwrap();
    let alice = a(&deps, "alice");

    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&alice, &[]),
        ExecuteMsg::UpdatePrice {
            token_id: "1".to_string(),
            price: Uint128::zero(),
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::ZeroPrice);

    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&alice, &[]),
        ExecuteMsg::UpdatePrice {
            token_id: "1".to_string(),
            price: Uint128::new(600),
        },
    )
    .unwrap();
    assert_eq!(listing(&deps, "1").unwrap().price, Uint128::new(600));
    buy(&mut deps, "bob", "1", &coins(600, DENOM)).unwrap();
}

#[test]
fn test_pause_blocks_trading_but_not_cancel() {
    let mut deps = setup();
    list(&mut deps, "alice", "1", 1_000).unwrap();
    let owner = a(&deps, "owner");
    execute(deps.as_mut(), mock_env(), message_info(&owner, &[]), ExecuteMsg::Pause {}).unwrap();

    assert_eq!(list(&mut deps, "alice", "2", 10).unwrap_err(), ContractError::Paused);
    let err = execute(deps.as_mut(), mock_env(), message_info(&owner, &[]), ExecuteMsg::Pause {}).unwrap_err();
    assert_eq!(err, ContractError::Paused);
    assert_eq!(
        buy(&mut deps, "bob", "1", &coins(1_000, DENOM)).unwrap_err(),
        ContractError::Paused
    );

    let alice = a(&deps, "alice");
    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&alice, &[]),
        ExecuteMsg::CancelListing {
            token_id: "1".to_string(),
        },
    )
    .unwrap();
}

#[test]
fn test_listings_by_seller() {
    let mut deps = setup();
    list(&mut deps, "alice", "1", 10).unwrap();
    list(&mut deps, "bob", "2", 20).unwrap();
    list(&mut deps, "alice", "3", 30).unwrap();

    let alice = a(&deps, "alice");
    let res: ListingsResponse = from_json(
        query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::ListingsBySeller {
                seller: alice.to_string(),
                start_after: None,
                limit: None,
            },
        )
        .unwrap(),
    )
    .unwrap();
    let ids: Vec<_> = res.listings.iter().map(|l| l.token_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);

    let res: ListingsResponse = from_json(
        query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::ListingsBySeller {
                seller: alice.to_string(),
                start_after: Some("1".to_string()),
                limit: Some(1),
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(res.listings.len(), 1);
    assert_eq!(res.listings[0].token_id, "3");

    let all: ListingsResponse = from_json(
        query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::Listings {
                start_after: None,
                limit: None,
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(all.listings.len(), 3);
}

#[test]
fn test_update_fee_owner_only() {
    let mut deps = setup();
    let owner = a(&deps, "owner");
    let alice = a(&deps, "alice");
    let new_treasury = a(&deps, "new_treasury");

    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&alice, &[]),
        ExecuteMsg::UpdateFee {
            fee_bps: 0,
            treasury: None,
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            role: "owner".to_string()
        }
    );

    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&owner, &[]),
        ExecuteMsg::UpdateFee {
            fee_bps: 20_000,
            treasury: None,
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::InvalidFee { fee_bps: 20_000 });

    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&owner, &[]),
        ExecuteMsg::UpdateFee {
            fee_bps: 500,
            treasury: Some(new_treasury.to_string()),
        },
    )
    .unwrap();
    let config: Config = from_json(query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap()).unwrap();
    assert_eq!(config.fee_bps, 500);
    assert_eq!(config.treasury, new_treasury);
}

// ─── Pet contract integration ───────────────────────────────────────────────

mod flow {
    use super::*;
    use etherpets_pet_nft::contract as pet;
    use etherpets_pet_nft::msg as pet_msg;

    #[test]
    fn test_list_and_buy_through_pet_contract() {
        let mut app = App::default();
        let owner = app.api().addr_make("owner");
        let alice = app.api().addr_make("alice");
        let bob = app.api().addr_make("bob");
        let treasury = app.api().addr_make("treasury");
        app.init_modules(|router, _api, storage| {
            router
                .bank
                .init_balance(storage, &bob, coins(5_000, DENOM))
                .unwrap();
        });

        let pet_code = app.store_code(Box::new(
            ContractWrapper::new(pet::execute, pet::instantiate, pet::query).with_reply(pet::reply),
        ));
        let market_code = app.store_code(Box::new(ContractWrapper::new(execute, instantiate, query)));

        let pets = app
            .instantiate_contract(
                pet_code,
                owner.clone(),
                &pet_msg::InstantiateMsg {
                    owner: owner.to_string(),
                    minter: owner.to_string(),
                    name: "EtherPets".to_string(),
                    symbol: "PET".to_string(),
                    decay: None,
                    denom: DENOM.to_string(),
                    adoption_fee: None,
                    quest_contract: None,
                    item_contract: None,
                },
                &[],
                "pets",
                None,
            )
            .unwrap();
        let market = app
            .instantiate_contract(
                market_code,
                owner.clone(),
                &InstantiateMsg {
                    owner: owner.to_string(),
                    pet_contract: pets.to_string(),
                    denom: DENOM.to_string(),
                    fee_bps: 500,
                    treasury: treasury.to_string(),
                },
                &[],
                "market",
                None,
            )
            .unwrap();

        app.execute_contract(
            owner.clone(),
            pets.clone(),
            &pet_msg::ExecuteMsg::Mint {
                to: alice.to_string(),
                name: "Ember".to_string(),
                species: "dragon".to_string(),
                token_uri: None,
            },
            &[],
        )
        .unwrap();

        app.execute_contract(
            alice.clone(),
            pets.clone(),
            &pet_msg::ExecuteMsg::SendNft {
                contract: market.to_string(),
                token_id: "1".to_string(),
                msg: to_json_binary(&ReceiveMsg::ListPet {
                    price: Uint128::new(2_000),
                })
                .unwrap(),
            },
            &[],
        )
        .unwrap();

        let owner_of: pet_msg::OwnerOfResponse = app
            .wrap()
            .query_wasm_smart(
                &pets,
                &pet_msg::QueryMsg::OwnerOf {
                    token_id: "1".to_string(),
                },
            )
            .unwrap();
        assert_eq!(owner_of.owner, market.to_string());

        app.execute_contract(
            bob.clone(),
            market.clone(),
            &ExecuteMsg::Buy {
                token_id: "1".to_string(),
            },
            &coins(2_000, DENOM),
        )
        .unwrap();

        let owner_of: pet_msg::OwnerOfResponse = app
            .wrap()
            .query_wasm_smart(
                &pets,
                &pet_msg::QueryMsg::OwnerOf {
                    token_id: "1".to_string(),
                },
            )
            .unwrap();
        assert_eq!(owner_of.owner, bob.to_string());

        let balance = |who: &Addr| app.wrap().query_balance(who, DENOM).unwrap().amount;
        assert_eq!(balance(&alice), Uint128::new(1_900));
        assert_eq!(balance(&treasury), Uint128::new(100));
        assert_eq!(balance(&bob), Uint128::new(3_000));
        assert_eq!(balance(&market), Uint128::zero());
    }

    #[test]
    fn test_failed_listing_keeps_pet_with_owner() {
        let mut app = App::default();
        let owner = app.api().addr_make("owner");
        let alice = app.api().addr_make("alice");

        let pet_code = app.store_code(Box::new(
            ContractWrapper::new(pet::execute, pet::instantiate, pet::query).with_reply(pet::reply),
        ));
        let market_code = app.store_code(Box::new(ContractWrapper::new(execute, instantiate, query)));
        let pets = app
            .instantiate_contract(
                pet_code,
                owner.clone(),
                &pet_msg::InstantiateMsg {
                    owner: owner.to_string(),
                    minter: owner.to_string(),
                    name: "EtherPets".to_string(),
                    symbol: "PET".to_string(),
                    decay: None,
                    denom: DENOM.to_string(),
                    adoption_fee: None,
                    quest_contract: None,
                    item_contract: None,
                },
                &[],
                "pets",
                None,
            )
            .unwrap();
        let market = app
            .instantiate_contract(
                market_code,
                owner.clone(),
                &InstantiateMsg {
                    owner: owner.to_string(),
                    pet_contract: pets.to_string(),
                    denom: DENOM.to_string(),
                    fee_bps: 0,
                    treasury: owner.to_string(),
                },
                &[],
                "market",
                None,
            )
            .unwrap();
        app.execute_contract(
            owner.clone(),
            pets.clone(),
            &pet_msg::ExecuteMsg::Mint {
                to: alice.to_string(),
                name: "Ember".to_string(),
                species: "dragon".to_string(),
                token_uri: None,
            },
            &[],
        )
        .unwrap();

        let err = app
            .execute_contract(
                alice.clone(),
                pets.clone(),
                &pet_msg::ExecuteMsg::SendNft {
                    contract: market.to_string(),
                    token_id: "1".to_string(),
                    msg: to_json_binary(&ReceiveMsg::ListPet {
                        price: Uint128::zero(),
                    })
                    .unwrap(),
                },
                &[],
            )
            .unwrap_err();
        assert_eq!(err.root_cause().to_string(), ContractError::ZeroPrice.to_string());

        let owner_of: pet_msg::OwnerOfResponse = app
            .wrap()
            .query_wasm_smart(
                &pets,
                &pet_msg::QueryMsg::OwnerOf {
                    token_id: "1".to_string(),
                },
            )
            .unwrap();
        assert_eq!(owner_of.owner, alice.to_string());
    }
}
