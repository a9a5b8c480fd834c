use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{
    coin, from_json, Addr, CosmosMsg, MemoryStorage, OwnedDeps, Response, WasmMsg,
};
use cw_multi_test::{App, ContractWrapper, Executor};

use etherpets_items::contract::*;
use etherpets_items::error::ContractError;
use etherpets_items::msg::*;
use etherpets_items::state::Config;
use etherpets_pet_nft::msg::ExecuteMsg as PetExecuteMsg;
use etherpets_pet_nft::stats::{FoodType, GameType, ItemKind};

type Deps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

const APPLE: ItemKind = ItemKind::Food(FoodType::Basic);
const BALL: ItemKind = ItemKind::Toy(GameType::Fetch);

fn a(deps: &Deps, name: &str) -> Addr {
    deps.api.addr_make(name)
}

fn setup_with(pet_contract: Option<String>) -> Deps {
    let mut deps = mock_dependencies();
    let owner = deps.api.addr_make("owner");
    let minter = deps.api.addr_make("minter");
    let royalty = deps.api.addr_make("royalty");

    let msg = InstantiateMsg {
        owner: owner.to_string(),
        minter: minter.to_string(),
        pet_contract,
        royalty_bps: 500,
        royalty_recipient: royalty.to_string(),
        name: "EtherPets Items".to_string(),
        symbol: "PETITEM".to_string(),
    };
    instantiate(deps.as_mut(), mock_env(), message_info(&owner, &[]), msg).unwrap();
    deps
}

fn setup() -> Deps {
    let pets = MockApi::default().addr_make("pets");
    setup_with(Some(pets.to_string()))
}

fn run(deps: &mut Deps, who: &str, msg: ExecuteMsg) -> Result<Response, ContractError> {
    let sender = a(deps, who);
    execute(deps.as_mut(), mock_env(), message_info(&sender, &[]), msg)
}

fn mint(deps: &mut Deps, to: &str, kind: ItemKind) -> String {
    let to = a(deps, to);
    let res = run(
        deps,
        "minter",
        ExecuteMsg::Mint {
            to: to.to_string(),
            kind,
            token_uri: None,
        },
    )
    .unwrap();
    res.attributes
        .iter()
        .find(|at| at.key == "token_id")
        .unwrap()
        .value
        .clone()
}

fn tokens_of(deps: &Deps, owner: &str) -> Vec<String> {
    let res: TokensResponse = from_json(
        query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::Tokens {
                owner: a(deps, owner).to_string(),
                start_after: None,
                limit: None,
            },
        )
        .unwrap(),
    )
    .unwrap();
    res.tokens
}

fn num_tokens(deps: &Deps) -> u64 {
    let res: NumTokensResponse =
        from_json(query(deps.as_ref(), mock_env(), QueryMsg::NumTokens {}).unwrap()).unwrap();
    res.count
}

fn use_item(item_id: &str, pet_id: &str) -> ExecuteMsg {
    ExecuteMsg::UseItem {
        item_id: item_id.to_string(),
        pet_id: pet_id.to_string(),
    }
}

// ─── Instantiation ──────────────────────────────────────────────────────────

#[test]
fn test_instantiate() {
    let deps = setup();
    let config: Config =
        from_json(query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap()).unwrap();
    assert_eq!(config.owner, a(&deps, "owner"));
    assert_eq!(config.minter, a(&deps, "minter"));
    assert_eq!(config.pet_contract, Some(a(&deps, "pets")));
    assert_eq!(config.royalty_bps, 500);
    assert!(!config.paused);
    assert_eq!(num_tokens(&deps), 0);
}

#[test]
fn test_instantiate_invalid_royalty() {
    let mut deps = mock_dependencies();
    let owner = deps.api.addr_make("owner");
    let msg = InstantiateMsg {
        owner: owner.to_string(),
        minter: owner.to_string(),
        pet_contract: None,
        royalty_bps: 10_001,
        royalty_recipient: owner.to_string(),
        name: "Items".to_string(),
        symbol: "ITM".to_string(),
    };
    let err = instantiate(deps.as_mut(), mock_env(), message_info(&owner, &[]), msg).unwrap_err();
    assert_eq!(err, ContractError::InvalidRoyaltyBps { bps: 10_001 });
}

// ─── Minting ────────────────────────────────────────────────────────────────

#[test]
fn test_mint_by_minter() {
    let mut deps = setup();
    let token_id = mint(&mut deps, "alice", APPLE);
    assert_eq!(token_id, "1");

    let info: NftInfoResponse = from_json(
        query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::NftInfo {
                token_id: token_id.clone(),
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(info.owner, a(&deps, "alice").to_string());
    assert_eq!(info.kind, APPLE);
    assert_eq!(tokens_of(&deps, "alice"), vec![token_id]);
    assert_eq!(num_tokens(&deps), 1);
}

#[test]
fn test_mint_by_non_minter_fails() {
    let mut deps = setup();
    let alice = a(&deps, "alice");
    let err = run(
        &mut deps,
        "alice",
        ExecuteMsg::Mint {
            to: alice.to_string(),
            kind: BALL,
            token_uri: None,
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            role: "minter".to_string()
        }
    );
}

#[test]
fn test_batch_mint() {
    let mut deps = setup();
    let alice = a(&deps, "alice");
    let bob = a(&deps, "bob");
    let request = |to: &Addr, kind| MintRequest {
        to: to.to_string(),
        kind,
        token_uri: None,
    };

    let res = run(
        &mut deps,
        "minter",
        ExecuteMsg::BatchMint {
            mints: vec![request(&alice, APPLE), request(&bob, BALL), request(&alice, BALL)],
        },
    )
    .unwrap();
    assert!(res.attributes.iter().any(|at| at.key == "token_ids" && at.value == "1,2,3"));
    assert_eq!(tokens_of(&deps, "alice"), vec!["1".to_string(), "3".to_string()]);
    assert_eq!(num_tokens(&deps), 3);

    let err = run(&mut deps, "minter", ExecuteMsg::BatchMint { mints: vec![] }).unwrap_err();
    assert_eq!(err, ContractError::EmptyBatch);

    let too_many = (0..51).map(|_| request(&alice, APPLE)).collect();
    let err = run(&mut deps, "minter", ExecuteMsg::BatchMint { mints: too_many }).unwrap_err();
    assert_eq!(err, ContractError::BatchTooLarge { max: 50 });
    assert_eq!(num_tokens(&deps), 3);
}

// ─── Use ────────────────────────────────────────────────────────────────────

#[test]
fn test_use_item_burns_and_applies_to_pet() {
    let mut deps = setup();
    let token_id = mint(&mut deps, "alice", APPLE);

    let res = run(&mut deps, "alice", use_item(&token_id, "7")).unwrap();
    assert_eq!(res.messages.len(), 1);
    let CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr,
        msg,
        funds,
    }) = &res.messages[0].msg
    else {
        panic!("expected a pet contract call");
    };
    assert_eq!(contract_addr, a(&deps, "pets").as_str());
    assert!(funds.is_empty());
    let apply: PetExecuteMsg = from_json(msg).unwrap();
    assert_eq!(
        apply,
        PetExecuteMsg::UseItem {
            player: a(&deps, "alice").to_string(),
            token_id: "7".to_string(),
            item: APPLE,
        }
    );

    assert!(tokens_of(&deps, "alice").is_empty());
    assert_eq!(num_tokens(&deps), 0);
    let err = run(&mut deps, "alice", use_item(&token_id, "7")).unwrap_err();
    assert_eq!(err, ContractError::TokenNotFound { token_id });
}

#[test]
fn test_use_item_requires_rights_over_item() {
    let mut deps = setup();
    let token_id = mint(&mut deps, "alice", BALL);

    let err = run(&mut deps, "bob", use_item(&token_id, "1")).unwrap_err();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            role: "owner or approved".to_string()
        }
    );

    let bob = a(&deps, "bob");
    run(
        &mut deps,
        "alice",
        ExecuteMsg::ApproveAll {
            operator: bob.to_string(),
        },
    )
    .unwrap();
    let res = run(&mut deps, "bob", use_item(&token_id, "1")).unwrap();
    assert!(res.attributes.iter().any(|at| at.key == "player" && at.value == bob.as_str()));
}

#[test]
fn test_use_item_needs_linked_pet_contract() {
    let mut deps = setup_with(None);
    let token_id = mint(&mut deps, "alice", APPLE);
    let err = run(&mut deps, "alice", use_item(&token_id, "1")).unwrap_err();
    assert_eq!(err, ContractError::PetContractNotSet);
    assert_eq!(num_tokens(&deps), 1);

    let pets = a(&deps, "pets");
    run(
        &mut deps,
        "owner",
        ExecuteMsg::SetPetContract {
            pet_contract: pets.to_string(),
        },
    )
    .unwrap();
    run(&mut deps, "alice", use_item(&token_id, "1")).unwrap();

    run(
        &mut deps,
        "owner",
        ExecuteMsg::SetPetContract {
            pet_contract: String::new(),
        },
    )
    .unwrap();
    let config: Config =
        from_json(query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap()).unwrap();
    assert_eq!(config.pet_contract, None);
}

#[test]
fn test_use_item_rejects_funds() {
    let mut deps = setup();
    let token_id = mint(&mut deps, "alice", APPLE);
    let alice = a(&deps, "alice");
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&alice, &[coin(1, "upet")]),
        use_item(&token_id, "1"),
    )
    .unwrap_err();
    assert_eq!(err, ContractError::UnexpectedFunds);
}

// ─── Transfers ──────────────────────────────────────────────────────────────

#[test]
fn test_transfer_updates_owner_index() {
    let mut deps = setup();
    let token_id = mint(&mut deps, "alice", BALL);
    let bob = a(&deps, "bob");

    run(
        &mut deps,
        "alice",
        ExecuteMsg::TransferNft {
            recipient: bob.to_string(),
            token_id: token_id.clone(),
        },
    )
    .unwrap();
    assert!(tokens_of(&deps, "alice").is_empty());
    assert_eq!(tokens_of(&deps, "bob"), vec![token_id.clone()]);

    let err = run(
        &mut deps,
        "alice",
        ExecuteMsg::TransferNft {
            recipient: bob.to_string(),
            token_id,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::Unauthorized { .. }));
}

#[test]
fn test_approval_cleared_on_transfer() {
    let mut deps = setup();
    let token_id = mint(&mut deps, "alice", BALL);
    let bob = a(&deps, "bob");
    let carol = a(&deps, "carol");

    run(
        &mut deps,
        "alice",
        ExecuteMsg::Approve {
            spender: bob.to_string(),
            token_id: token_id.clone(),
        },
    )
    .unwrap();
    run(
        &mut deps,
        "bob",
        ExecuteMsg::TransferNft {
            recipient: carol.to_string(),
            token_id: token_id.clone(),
        },
    )
    .unwrap();

    let res: ApprovalResponse = from_json(
        query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::Approval {
                token_id,
                spender: bob.to_string(),
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert!(!res.approved);
}

#[test]
fn test_burn() {
    let mut deps = setup();
    let token_id = mint(&mut deps, "alice", APPLE);
    let burn = ExecuteMsg::Burn {
        token_id: token_id.clone(),
    };

    let err = run(&mut deps, "bob", burn.clone()).unwrap_err();
    assert!(matches!(err, ContractError::Unauthorized { .. }));

    run(&mut deps, "alice", burn).unwrap();
    assert_eq!(num_tokens(&deps), 0);

    // ids are never reused
    assert_eq!(mint(&mut deps, "alice", APPLE), "2");
}

// ─── Admin ──────────────────────────────────────────────────────────────────

#[test]
fn test_pause_freezes_items() {
    let mut deps = setup();
    let token_id = mint(&mut deps, "alice", APPLE);
    run(&mut deps, "owner", ExecuteMsg::Pause {}).unwrap();
    assert_eq!(run(&mut deps, "owner", ExecuteMsg::Pause {}).unwrap_err(), ContractError::Paused);

    assert_eq!(run(&mut deps, "alice", use_item(&token_id, "1")).unwrap_err(), ContractError::Paused);
    let alice = a(&deps, "alice");
    let err = run(
        &mut deps,
        "minter",
        ExecuteMsg::Mint {
            to: alice.to_string(),
            kind: BALL,
            token_uri: None,
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::Paused);

    run(&mut deps, "owner", ExecuteMsg::Unpause {}).unwrap();
    assert_eq!(run(&mut deps, "owner", ExecuteMsg::Unpause {}).unwrap_err(), ContractError::NotPaused);
    run(&mut deps, "alice", use_item(&token_id, "1")).unwrap();
}

#[test]
fn test_update_royalty() {
    let mut deps = setup();
    let treasury = a(&deps, "treasury");

    let err = run(
        &mut deps,
        "owner",
        ExecuteMsg::UpdateRoyalty {
            royalty_bps: 20_000,
            royalty_recipient: treasury.to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::InvalidRoyaltyBps { bps: 20_000 });

    run(
        &mut deps,
        "owner",
        ExecuteMsg::UpdateRoyalty {
            royalty_bps: 250,
            royalty_recipient: treasury.to_string(),
        },
    )
    .unwrap();
    let res: RoyaltyInfoResponse =
        from_json(query(deps.as_ref(), mock_env(), QueryMsg::RoyaltyInfo {}).unwrap()).unwrap();
    assert_eq!(res.royalty_bps, 250);
    assert_eq!(res.royalty_recipient, treasury.to_string());
}

#[test]
fn test_two_step_minter_transfer() {
    let mut deps = setup();
    let shop = a(&deps, "shop");

    run(
        &mut deps,
        "owner",
        ExecuteMsg::ProposeMinter {
            new_minter: shop.to_string(),
        },
    )
    .unwrap();
    assert_eq!(
        run(&mut deps, "alice", ExecuteMsg::AcceptMinter {}).unwrap_err(),
        ContractError::NotPendingMinter
    );
    run(&mut deps, "shop", ExecuteMsg::AcceptMinter {}).unwrap();

    let config: Config =
        from_json(query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap()).unwrap();
    assert_eq!(config.minter, shop);
    assert!(matches!(
        run(
            &mut deps,
            "minter",
            ExecuteMsg::Mint {
                to: shop.to_string(),
                kind: APPLE,
                token_uri: None,
            },
        )
        .unwrap_err(),
        ContractError::Unauthorized { .. }
    ));
}

#[test]
fn test_two_step_owner_transfer() {
    let mut deps = setup();
    let new_owner = a(&deps, "new_owner");

    run(
        &mut deps,
        "owner",
        ExecuteMsg::ProposeOwner {
            new_owner: new_owner.to_string(),
        },
    )
    .unwrap();
    assert_eq!(
        run(
            &mut deps,
            "owner",
            ExecuteMsg::ProposeOwner {
                new_owner: new_owner.to_string(),
            },
        )
        .unwrap_err(),
        ContractError::OwnerTransferAlreadyPending
    );
    run(&mut deps, "new_owner", ExecuteMsg::AcceptOwner {}).unwrap();
    assert_eq!(
        run(&mut deps, "owner", ExecuteMsg::Pause {}).unwrap_err(),
        ContractError::Unauthorized {
            role: "owner".to_string()
        }
    );
    run(&mut deps, "new_owner", ExecuteMsg::Pause {}).unwrap();
}

// ─── Pet contract integration ───────────────────────────────────────────────

mod flow {
    use super::*;
    use cosmwasm_std::Timestamp;
    use etherpets_pet_nft::contract as pet;
    use etherpets_pet_nft::msg as pet_msg;

    struct Suite {
        app: App,
        alice: Addr,
        bob: Addr,
        pets: Addr,
        items: Addr,
    }

    fn suite() -> Suite {
        let mut app = App::default();
        let owner = app.api().addr_make("owner");
        let alice = app.api().addr_make("alice");
        let bob = app.api().addr_make("bob");

        let pet_code = app.store_code(Box::new(
            ContractWrapper::new(pet::execute, pet::instantiate, pet::query).with_reply(pet::reply),
        ));
        let item_code = app.store_code(Box::new(ContractWrapper::new(execute, instantiate, query)));

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
                    denom: "upet".to_string(),
                    adoption_fee: None,
                    quest_contract: None,
                    item_contract: None,
                },
                &[],
                "pets",
                None,
            )
            .unwrap();
        let items = app
            .instantiate_contract(
                item_code,
                owner.clone(),
                &InstantiateMsg {
                    owner: owner.to_string(),
                    minter: owner.to_string(),
                    pet_contract: Some(pets.to_string()),
                    royalty_bps: 0,
                    royalty_recipient: owner.to_string(),
                    name: "EtherPets Items".to_string(),
                    symbol: "PETITEM".to_string(),
                },
                &[],
                "items",
                None,
            )
            .unwrap();
        app.execute_contract(
            owner.clone(),
            pets.clone(),
            &pet_msg::ExecuteMsg::UpdateConfig {
                decay: None,
                adoption_fee: None,
                quest_contract: None,
                item_contract: Some(items.to_string()),
            },
            &[],
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
        for (to, kind) in [(&alice, APPLE), (&alice, ItemKind::Toy(GameType::Race)), (&bob, APPLE)] {
            app.execute_contract(
                owner.clone(),
                items.clone(),
                &ExecuteMsg::Mint {
                    to: to.to_string(),
                    kind,
                    token_uri: None,
                },
                &[],
            )
            .unwrap();
        }

        Suite {
            app,
            alice,
            bob,
            pets,
            items,
        }
    }

    fn pet_state(s: &Suite) -> pet_msg::PetResponse {
        s.app
            .wrap()
            .query_wasm_smart(
                &s.pets,
                &pet_msg::QueryMsg::Pet {
                    token_id: "1".to_string(),
                },
            )
            .unwrap()
    }

    fn item_count(s: &Suite) -> u64 {
        let res: NumTokensResponse = s
            .app
            .wrap()
            .query_wasm_smart(&s.items, &QueryMsg::NumTokens {})
            .unwrap();
        res.count
    }

    #[test]
    fn test_food_item_feeds_pet() {
        let mut s = suite();
        s.app.update_block(|block| {
            block.time = Timestamp::from_seconds(block.time.seconds() + 10 * 3_600);
        });
        let before = pet_state(&s);
        assert_eq!(before.stats.hunger, 70);

        let res = s
            .app
            .execute_contract(s.alice.clone(), s.items.clone(), &use_item("1", "1"), &[])
            .unwrap();
        assert!(res
            .events
            .iter()
            .any(|e| e.attributes.iter().any(|at| at.key == "item" && at.value == "food")));

        let after = pet_state(&s);
        assert_eq!(after.stats.hunger, 90);
        assert_eq!(after.experience, 5);
        assert_eq!(item_count(&s), 2);
    }

    #[test]
    fn test_rejected_use_keeps_item() {
        let mut s = suite();

        // bob owns an apple but not the pet
        let err = s
            .app
            .execute_contract(s.bob.clone(), s.items.clone(), &use_item("3", "1"), &[])
            .unwrap_err();
        assert_eq!(
            err.root_cause().to_string(),
            etherpets_pet_nft::error::ContractError::Unauthorized {
                role: "owner or approved".to_string()
            }
            .to_string()
        );
        assert_eq!(item_count(&s), 3);

        // an exhausted pet cannot race, so the toy survives
        s.app.update_block(|block| {
            block.time = Timestamp::from_seconds(block.time.seconds() + 50 * 3_600);
        });
        let err = s
            .app
            .execute_contract(s.alice.clone(), s.items.clone(), &use_item("2", "1"), &[])
            .unwrap_err();
        assert_eq!(
            err.root_cause().to_string(),
            etherpets_pet_nft::error::ContractError::InsufficientEnergy {
                required: 25,
                available: 0
            }
            .to_string()
        );
        let owner_of: OwnerOfResponse = s
            .app
            .wrap()
            .query_wasm_smart(
                &s.items,
                &QueryMsg::OwnerOf {
                    token_id: "2".to_string(),
                },
            )
            .unwrap();
        assert_eq!(owner_of.owner, s.alice.to_string());
    }
}
