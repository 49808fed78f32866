//! Store feed (Stores/Branches) XML parsing.

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use smartcart_normalize::{RawChainRecord, RawStoreRecord, RawSubChainRecord};

use crate::error::FeedError;

/// Parses a store-hierarchy feed XML body into one raw chain record.
///
/// The feeds publish one chain per document; sub-chains and stores nest
/// inside it.
///
/// # Errors
///
/// Returns [`FeedError::Xml`] if the document is malformed.
pub fn parse_store_feed(xml: &str) -> Result<RawChainRecord, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut chain = RawChainRecord::default();
    let mut current_sub_chain: Option<RawSubChainRecord> = None;
    let mut current_store: Option<RawStoreRecord> = None;
    let mut current_tag = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                match name.as_str() {
                    "SubChain" => current_sub_chain = Some(RawSubChainRecord::default()),
                    "Store" => current_store = Some(RawStoreRecord::default()),
                    _ => current_tag = name,
                }
            }
            Ok(Event::End(e)) => {
                let raw = e.name();
                let name = std::str::from_utf8(raw.as_ref()).unwrap_or("");
                match name {
                    "Store" => {
                        if let (Some(store), Some(sub)) =
                            (current_store.take(), current_sub_chain.as_mut())
                        {
                            sub.stores.push(store);
                        }
                    }
                    "SubChain" => {
                        if let Some(sub) = current_sub_chain.take() {
                            chain.sub_chains.push(sub);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().unwrap_or_default().into_owned();
                assign_field(
                    &mut chain,
                    current_sub_chain.as_mut(),
                    current_store.as_mut(),
                    &current_tag,
                    text,
                );
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                assign_field(
                    &mut chain,
                    current_sub_chain.as_mut(),
                    current_store.as_mut(),
                    &current_tag,
                    text,
                );
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FeedError::Xml(e)),
            _ => {}
        }
    }

    debug!(
        chain_id = %chain.chain_id,
        sub_chains = chain.sub_chains.len(),
        "store feed parsed"
    );
    Ok(chain)
}

fn assign_field(
    chain: &mut RawChainRecord,
    current_sub_chain: Option<&mut RawSubChainRecord>,
    current_store: Option<&mut RawStoreRecord>,
    tag: &str,
    text: String,
) {
    if let Some(store) = current_store {
        match tag {
            "StoreId" => store.store_id = text,
            "ChainId" => store.chain_id = text,
            "SubChainId" => store.sub_chain_id = text,
            "StoreName" => store.store_name = text,
            "Street" => store.street = text,
            "StreetNumber" => store.street_number = text,
            "Address" => store.address = text,
            "City" => store.city = text,
            "EnglishCity" => store.english_city = text,
            "ZipCode" => store.zip_code = text,
            _ => {}
        }
        return;
    }

    if let Some(sub) = current_sub_chain {
        match tag {
            "SubChainId" => sub.sub_chain_id = text,
            "SubChainName" => sub.sub_chain_name = text,
            _ => {}
        }
        return;
    }

    match tag {
        "ChainId" => chain.chain_id = text,
        "ChainName" => chain.chain_name = text,
        "LastUpdateDate" => chain.last_update_date = text,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Root>
  <ChainId>7290058140886</ChainId>
  <ChainName>רמי לוי שיווק השקמה</ChainName>
  <LastUpdateDate>2025-05-25 06:00:00</LastUpdateDate>
  <SubChains>
    <SubChain>
      <SubChainId>1</SubChainId>
      <SubChainName>רמי לוי שיווק השקמה</SubChainName>
      <Stores>
        <Store>
          <StoreId>001</StoreId>
          <StoreName>רמי לוי גילה</StoreName>
          <Address>דרך חברון 184</Address>
          <City>ירושלים</City>
          <ZipCode>9342842</ZipCode>
        </Store>
        <Store>
          <StoreId>002</StoreId>
          <StoreName>רמי לוי מודיעין</StoreName>
          <Address></Address>
          <City>מודיעין</City>
          <ZipCode>0000000</ZipCode>
        </Store>
      </Stores>
    </SubChain>
  </SubChains>
</Root>"#;

    #[test]
    fn parses_chain_hierarchy() {
        let chain = parse_store_feed(SAMPLE).unwrap();
        assert_eq!(chain.chain_id, "7290058140886");
        assert_eq!(chain.chain_name, "רמי לוי שיווק השקמה");
        assert_eq!(chain.sub_chains.len(), 1);
        assert_eq!(chain.sub_chains[0].stores.len(), 2);
    }

    #[test]
    fn store_fields_arrive_verbatim() {
        let chain = parse_store_feed(SAMPLE).unwrap();
        let store = &chain.sub_chains[0].stores[0];
        assert_eq!(store.store_id, "001");
        assert_eq!(store.store_name, "רמי לוי גילה");
        assert_eq!(store.city, "ירושלים");
        assert_eq!(store.zip_code, "9342842");
    }

    #[test]
    fn empty_and_sentinel_fields_pass_through() {
        let chain = parse_store_feed(SAMPLE).unwrap();
        let store = &chain.sub_chains[0].stores[1];
        assert!(store.address.is_empty());
        assert_eq!(store.zip_code, "0000000");
    }

    #[test]
    fn malformed_xml_errors() {
        let result = parse_store_feed("<Root><SubChains><SubChain></Nope>");
        assert!(matches!(result, Err(FeedError::Xml(_))));
    }
}
