use ctrl_core::category::CategoryTable;
use ctrl_core::enums::Language;
use ctrl_query::QueryEngine;
use serde_json::json;

/// Four-record UK snapshot shared by command tests.
pub fn engine() -> QueryEngine {
    let data = json!([
        {"id": 1, "question_text": "Is Betfair trustworthy?", "answer": "Betfair is regulated.",
         "category": 1, "classification": "OPPORTUNITY", "mention": true, "position": 1,
         "ranking_list": ["Betfair", "Bet365"]},
        {"id": 2, "question_text": "Best betting exchange?", "answer": "Smarkets and Betfair.",
         "category": 2, "classification": "WARNING", "mention": true, "position": 2,
         "ranking_list": ["Smarkets", "betfair"],
         "triggers_detail": [
             {"trigger": "ranking", "type": "WARNING", "context": "second", "reason": "not first"}
         ]},
        {"id": 3, "question_text": "Top bookmakers UK", "answer": "Bet365, William Hill.",
         "category": 2, "classification": "CRITICAL", "mention": false,
         "ranking_list": ["Bet365", "William Hill"],
         "triggers_detail": [
             {"trigger": "absence", "type": "CRITICAL", "context": "-", "reason": "not listed"},
             {"trigger": "ranking", "type": "WARNING", "context": "-", "reason": "-"}
         ]},
        {"id": 4, "question_text": "Cheapest odds?", "answer": "Exchanges.",
         "category": 4, "classification": "CRITICAL", "mention": false,
         "psychological_impact": "Users may not consider Betfair.",
         "triggers_detail": [
             {"trigger": "absence", "type": "CRITICAL", "context": "-", "reason": "-"}
         ]}
    ]);
    QueryEngine::from_json(&data.to_string(), CategoryTable::for_language(Language::En))
        .expect("fixture loads")
}
