//! Price feed (PriceFull) XML parsing.

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use smartcart_normalize::RawItemRecord;

use crate::error::FeedError;

/// A parsed price feed: the store identification from the document root plus
/// every `<Item>` record, untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceFeed {
    pub chain_id: String,
    pub sub_chain_id: String,
    pub store_id: String,
    pub items: Vec<RawItemRecord>,
}

/// Parses a price feed XML body into raw item records.
///
/// # Errors
///
/// Returns [`FeedError::Xml`] if the document is malformed.
pub fn parse_price_feed(xml: &str) -> Result<PriceFeed, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut feed = PriceFeed::default();
    let mut current_item: Option<RawItemRecord> = None;
    let mut current_tag = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                if name == "Item" {
                    current_item = Some(RawItemRecord::default());
                } else {
                    current_tag = name;
                }
            }
            Ok(Event::End(e)) => {
                let raw = e.name();
                let name = std::str::from_utf8(raw.as_ref()).unwrap_or("");
                if name == "Item" {
                    if let Some(item) = current_item.take() {
                        feed.items.push(item);
                    }
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().unwrap_or_default().into_owned();
                assign_field(&mut feed, current_item.as_mut(), &current_tag, text);
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                assign_field(&mut feed, current_item.as_mut(), &current_tag, text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FeedError::Xml(e)),
            _ => {}
        }
    }

    debug!(
        chain_id = %feed.chain_id,
        store_id = %feed.store_id,
        items = feed.items.len(),
        "price feed parsed"
    );
    Ok(feed)
}

fn assign_field(
    feed: &mut PriceFeed,
    current_item: Option<&mut RawItemRecord>,
    tag: &str,
    text: String,
) {
    if let Some(item) = current_item {
        match tag {
            "PriceUpdateDate" => item.price_update_date = text,
            "ItemCode" => item.item_code = text,
            "ItemType" => item.item_type = text,
            "ItemNm" => item.item_nm = text,
            "ManufacturerName" => item.manufacturer_name = text,
            "ManufactureCountry" => item.manufacture_country = text,
            "ManufacturerItemDescription" => item.manufacturer_item_description = text,
            "UnitQty" => item.unit_qty = text,
            "Quantity" => item.quantity = text,
            "UnitOfMeasure" => item.unit_of_measure = text,
            "bIsWeighted" => item.b_is_weighted = text,
            "QtyInPackage" => item.qty_in_package = text,
            "ItemPrice" => item.item_price = text,
            "UnitOfMeasurePrice" => item.unit_of_measure_price = text,
            "AllowDiscount" => item.allow_discount = text,
            "ItemStatus" => item.item_status = text,
            _ => {}
        }
    } else {
        match tag {
            "ChainId" => feed.chain_id = text,
            "SubChainId" => feed.sub_chain_id = text,
            "StoreId" => feed.store_id = text,
            _ => {}
        }
    }
}
