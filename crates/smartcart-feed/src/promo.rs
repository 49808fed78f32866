//! Promotion feed (PromoFull) XML parsing.
//!
//! Promotions nest two levels deep (`AdditionalRestrictions` with its
//! `Clubs` block, and `PromotionItems` with one-or-many `Item` children), so
//! this parser tracks which block it is inside. However many `Item`
//! children appear, the applicable-items list is materialized as a list.

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use smartcart_normalize::{OneOrMany, RawPromotionItemRef, RawPromotionRecord};

use crate::error::FeedError;

/// A parsed promotion feed: store identification plus every `<Promotion>`
/// record, untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromoFeed {
    pub chain_id: String,
    pub sub_chain_id: String,
    pub store_id: String,
    pub promotions: Vec<RawPromotionRecord>,
}

/// Parses a promotion feed XML body into raw promotion records.
///
/// # Errors
///
/// Returns [`FeedError::Xml`] if the document is malformed.
pub fn parse_promo_feed(xml: &str) -> Result<PromoFeed, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut feed = PromoFeed::default();
    let mut current_promotion: Option<RawPromotionRecord> = None;
    let mut promotion_items: Vec<RawPromotionItemRef> = Vec::new();
    let mut current_item: Option<RawPromotionItemRef> = None;
    let mut in_items = false;
    let mut in_restrictions = false;
    let mut in_clubs = false;
    let mut current_tag = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                match name.as_str() {
                    "Promotion" => {
                        current_promotion = Some(RawPromotionRecord::default());
                        promotion_items.clear();
                    }
                    "PromotionItems" => {
                        in_items = true;
                        if let Some(promo) = current_promotion.as_mut() {
                            promo.promotion_items.count = attribute_value(&e, "Count");
                        }
                    }
                    "Item" if in_items => {
                        current_item = Some(RawPromotionItemRef::default());
                    }
                    "AdditionalRestrictions" => in_restrictions = true,
                    "Clubs" => in_clubs = true,
                    _ => current_tag = name,
                }
            }
            Ok(Event::End(e)) => {
                let raw = e.name();
                let name = std::str::from_utf8(raw.as_ref()).unwrap_or("");
                match name {
                    "Promotion" => {
                        if let Some(mut promo) = current_promotion.take() {
                            promo.promotion_items.item =
                                OneOrMany::Many(std::mem::take(&mut promotion_items));
                            feed.promotions.push(promo);
                        }
                    }
                    "PromotionItems" => in_items = false,
                    "Item" if in_items => {
                        if let Some(item) = current_item.take() {
                            promotion_items.push(item);
                        }
                    }
                    "AdditionalRestrictions" => in_restrictions = false,
                    "Clubs" => in_clubs = false,
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().unwrap_or_default().into_owned();
                assign_field(
                    &mut feed,
                    current_promotion.as_mut(),
                    current_item.as_mut(),
                    in_restrictions,
                    in_clubs,
                    &current_tag,
                    text,
                );
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                assign_field(
                    &mut feed,
                    current_promotion.as_mut(),
                    current_item.as_mut(),
                    in_restrictions,
                    in_clubs,
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
        chain_id = %feed.chain_id,
        store_id = %feed.store_id,
        promotions = feed.promotions.len(),
        "promotion feed parsed"
    );
    Ok(feed)
}

fn attribute_value(e: &quick_xml::events::BytesStart<'_>, name: &str) -> String {
    e.attributes()
        .filter_map(Result::ok)
        .find(|attr| attr.key.as_ref().eq_ignore_ascii_case(name.as_bytes()))
        .and_then(|attr| String::from_utf8(attr.value.into_owned()).ok())
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn assign_field(
    feed: &mut PromoFeed,
    current_promotion: Option<&mut RawPromotionRecord>,
    current_item: Option<&mut RawPromotionItemRef>,
    in_restrictions: bool,
    in_clubs: bool,
    tag: &str,
    text: String,
) {
    if let Some(item) = current_item {
        match tag {
            "ItemCode" => item.item_code = text,
            "IsGiftItem" => item.is_gift_item = text,
            "ItemType" => item.item_type = text,
            _ => {}
        }
        return;
    }

    let Some(promo) = current_promotion else {
        match tag {
            "ChainId" => feed.chain_id = text,
            "SubChainId" => feed.sub_chain_id = text,
            "StoreId" => feed.store_id = text,
            _ => {}
        }
        return;
    };

    if in_clubs {
        if tag == "ClubId" {
            promo.additional_restrictions.clubs.club_id = text;
        }
        return;
    }

    if in_restrictions {
        let restrictions = &mut promo.additional_restrictions;
        match tag {
            "AdditionalIsCoupon" => restrictions.additional_is_coupon = text,
            "AdditionalGiftCount" => restrictions.additional_gift_count = text,
            "AdditionalIsTotal" => restrictions.additional_is_total = text,
            "AdditionalIsActive" => restrictions.additional_is_active = text,
            _ => {}
        }
        return;
    }

    match tag {
        "PromotionId" => promo.promotion_id = text,
        "PromotionDescription" => promo.promotion_description = text,
        "PromotionUpdateDate" => promo.promotion_update_date = text,
        "PromotionStartDate" => promo.promotion_start_date = text,
        "PromotionStartHour" => promo.promotion_start_hour = text,
        "PromotionEndDate" => promo.promotion_end_date = text,
        "PromotionEndHour" => promo.promotion_end_hour = text,
        "RewardType" => promo.reward_type = text,
        "DiscountType" => promo.discount_type = text,
        "DiscountRate" => promo.discount_rate = text,
        "AllowMultipleDiscounts" => promo.allow_multiple_discounts = text,
        "MinQty" => promo.min_qty = text,
        "MAXQTY" => promo.max_qty = text,
        "DiscountedPrice" => promo.discounted_price = text,
        "DiscountedPricePerMida" => promo.discounted_price_per_mida = text,
        "MinNoOfItemOfered" => promo.min_no_of_item_ofered = text,
        "Remarks" => promo.remarks = text,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Root>
  <ChainId>7290058140886</ChainId>
  <StoreId>006</StoreId>
  <Promotions>
    <Promotion>
      <PromotionId>1001</PromotionId>
      <PromotionDescription>2 ב26</PromotionDescription>
      <PromotionUpdateDate>2025-05-01 08:00:00</PromotionUpdateDate>
      <PromotionStartDate>2025-05-01</PromotionStartDate>
      <PromotionStartHour>00:00:00</PromotionStartHour>
      <PromotionEndDate>2025-05-31</PromotionEndDate>
      <PromotionEndHour>23:59:00</PromotionEndHour>
      <RewardType>1</RewardType>
      <DiscountType>1</DiscountType>
      <DiscountRate>0.00</DiscountRate>
      <AllowMultipleDiscounts>1</AllowMultipleDiscounts>
      <MinQty>2</MinQty>
      <MAXQTY>0</MAXQTY>
      <DiscountedPrice>13.00</DiscountedPrice>
      <MinNoOfItemOfered>10</MinNoOfItemOfered>
      <AdditionalRestrictions>
        <AdditionalIsCoupon>0</AdditionalIsCoupon>
        <AdditionalGiftCount>0</AdditionalGiftCount>
        <Clubs>
          <ClubId>118</ClubId>
        </Clubs>
        <AdditionalIsTotal>0</AdditionalIsTotal>
        <AdditionalIsActive>1</AdditionalIsActive>
      </AdditionalRestrictions>
      <PromotionItems Count="2">
        <Item>
          <ItemCode>7290000000001</ItemCode>
          <IsGiftItem>0</IsGiftItem>
          <ItemType>1</ItemType>
        </Item>
        <Item>
          <ItemCode>7290000000002</ItemCode>
          <IsGiftItem>0</IsGiftItem>
          <ItemType>1</ItemType>
        </Item>
      </PromotionItems>
      <Remarks></Remarks>
    </Promotion>
    <Promotion>
      <PromotionId>1002</PromotionId>
      <PromotionDescription>חרוסת 180 גר -4.9</PromotionDescription>
      <PromotionStartDate>2025-05-01</PromotionStartDate>
      <PromotionStartHour>00:00:00</PromotionStartHour>
      <PromotionEndDate>2025-05-10</PromotionEndDate>
      <PromotionEndHour>23:59:00</PromotionEndHour>
      <DiscountedPrice>4.90</DiscountedPrice>
      <PromotionItems Count="1">
        <Item>
          <ItemCode>7290000000003</ItemCode>
          <IsGiftItem>0</IsGiftItem>
          <ItemType>1</ItemType>
        </Item>
      </PromotionItems>
    </Promotion>
  </Promotions>
</Root>"#;

    #[test]
    fn parses_promotions_with_nested_blocks() {
        let feed = parse_promo_feed(SAMPLE).unwrap();
        assert_eq!(feed.chain_id, "7290058140886");
        assert_eq!(feed.promotions.len(), 2);

        let promo = &feed.promotions[0];
        assert_eq!(promo.promotion_id, "1001");
        assert_eq!(promo.promotion_description, "2 ב26");
        assert_eq!(promo.additional_restrictions.clubs.club_id, "118");
        assert_eq!(promo.promotion_items.count, "2");
        assert_eq!(promo.promotion_items.item.clone().into_vec().len(), 2);
    }

    #[test]
    fn single_item_promotion_materializes_one_element_list() {
        let feed = parse_promo_feed(SAMPLE).unwrap();
        let items = feed.promotions[1].promotion_items.item.clone().into_vec();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_code, "7290000000003");
    }

    #[test]
    fn restriction_fields_stay_out_of_promotion_fields() {
        let feed = parse_promo_feed(SAMPLE).unwrap();
        let promo = &feed.promotions[0];
        assert_eq!(promo.additional_restrictions.additional_is_coupon, "0");
        assert_eq!(promo.additional_restrictions.additional_is_active, "1");
        // The nested item's ItemType must not bleed into the promotion.
        assert_eq!(promo.promotion_items.item.clone().into_vec()[0].item_type, "1");
    }

    #[test]
    fn empty_document_yields_no_promotions() {
        let feed = parse_promo_feed("<Root><Promotions></Promotions></Root>").unwrap();
        assert!(feed.promotions.is_empty());
    }

    #[test]
    fn malformed_xml_errors() {
        let result = parse_promo_feed("<Root><Promotions><Promotion></Oops>");
        assert!(matches!(result, Err(FeedError::Xml(_))));
    }
}
