//! Canned provider responses for tests.
use std::sync::Arc;

use crate::{config::Provider, request::DummyApi, upstream::Upstream};

pub const BASE: &str = "http://provider.local";

/// An [`Upstream`] answering from `api`.
pub fn upstream(api: &DummyApi) -> Upstream {
    Upstream::new(Arc::new(api.clone()), Provider::for_tests(BASE))
}

/// `GetCategories` without details.
pub fn category_version(version: i64) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<GetCategoriesResponse xmlns="urn:ebay:apis:eBLBaseComponents">
  <Timestamp>2019-08-09T17:30:00.000Z</Timestamp>
  <Ack>Success</Ack>
  <Version>1119</Version>
  <Build>E1119_CORE_API_19146280_R1</Build>
  <CategoryVersion>{}</CategoryVersion>
  <MinimumReservePrice>0.0</MinimumReservePrice>
  <ReduceReserveAllowed>true</ReduceReserveAllowed>
  <CategoryCount>6</CategoryCount>
</GetCategoriesResponse>"#,
        version
    )
}

/// `GetCategories` with all details, `(id, name, parent)` each.
pub fn category_list(version: i64, categories: &[(&str, &str, &str)]) -> String {
    let categories: String = categories
        .iter()
        .map(|(id, name, parent)| {
            format!(
                r#"
    <Category>
      <BestOfferEnabled>true</BestOfferEnabled>
      <AutoPayEnabled>true</AutoPayEnabled>
      <CategoryID>{id}</CategoryID>
      <CategoryLevel>1</CategoryLevel>
      <CategoryName>{name}</CategoryName>
      <CategoryParentID>{parent}</CategoryParentID>
    </Category>"#,
                id = id,
                name = name,
                parent = parent
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<GetCategoriesResponse xmlns="urn:ebay:apis:eBLBaseComponents">
  <Timestamp>2019-08-09T17:30:00.000Z</Timestamp>
  <Ack>Success</Ack>
  <Version>1119</Version>
  <CategoryArray>{categories}
  </CategoryArray>
  <CategoryCount>6</CategoryCount>
  <CategoryVersion>{version}</CategoryVersion>
</GetCategoriesResponse>"#,
        categories = categories,
        version = version
    )
}

/// A small taxonomy.
///
/// ```text
/// 0
/// ├── 20081 Antiques
/// │   ├── 37903 Antiquities
/// │   │   └── 37905 Egyptian
/// │   └── 4707 Architectural
/// └── 550 Art
///     └── 28009 Art Prints
/// ```
pub const TAXONOMY: &[(&str, &str, &str)] = &[
    ("20081", "Antiques", "20081"),
    ("37903", "Antiquities", "20081"),
    ("37905", "Egyptian", "37903"),
    ("4707", "Architectural &amp; Garden", "20081"),
    ("550", "Art", "550"),
    ("28009", "Art Prints", "550"),
];

pub fn failure(call: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<{call}Response xmlns="urn:ebay:apis:eBLBaseComponents">
  <Timestamp>2019-08-09T17:30:00.000Z</Timestamp>
  <Ack>Failure</Ack>
  <Errors>
    <ShortMessage>Invalid value.</ShortMessage>
    <LongMessage>The value of the request is invalid.</LongMessage>
    <ErrorCode>37</ErrorCode>
    <SeverityCode>Error</SeverityCode>
  </Errors>
</{call}Response>"#,
        call = call
    )
}

pub const CATEGORY_FEATURES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<GetCategoryFeaturesResponse xmlns="urn:ebay:apis:eBLBaseComponents">
  <Timestamp>2019-08-09T17:30:00.000Z</Timestamp>
  <Ack>Success</Ack>
  <Version>1119</Version>
  <CategoryVersion>113</CategoryVersion>
  <Category>
    <CategoryID>20081</CategoryID>
    <ConditionValues>
      <Condition>
        <ID>1000</ID>
        <DisplayName>New</DisplayName>
      </Condition>
      <Condition>
        <ID>3000</ID>
        <DisplayName>Used</DisplayName>
      </Condition>
    </ConditionValues>
  </Category>
  <SiteDefaults>
    <ConditionEnabled>Enabled</ConditionEnabled>
  </SiteDefaults>
</GetCategoryFeaturesResponse>"#;

pub const OFFICIAL_TIME: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<GeteBayOfficialTimeResponse xmlns="urn:ebay:apis:eBLBaseComponents">
  <Timestamp>2019-08-09T17:30:00.000Z</Timestamp>
  <Ack>Success</Ack>
  <Version>1119</Version>
</GeteBayOfficialTimeResponse>"#;

pub const SINGLE_ITEM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<GetSingleItemResponse xmlns="urn:ebay:apis:eBLBaseComponents">
  <Timestamp>2019-08-09T17:30:00.000Z</Timestamp>
  <Ack>Success</Ack>
  <Build>E1119_CORE_APILW2_19110892_R1</Build>
  <Version>1119</Version>
  <Item>
    <BestOfferEnabled>false</BestOfferEnabled>
    <Description>&lt;p&gt;A fine camera.&lt;/p&gt;</Description>
    <ItemID>254321</ItemID>
    <EndTime>2019-08-12T10:00:00.000Z</EndTime>
    <StartTime>2019-08-05T10:00:00.000Z</StartTime>
    <ViewItemURLForNaturalSearch>https://www.ebay.com/itm/254321</ViewItemURLForNaturalSearch>
    <ListingType>Chinese</ListingType>
    <Location>Seattle, Washington</Location>
    <GalleryURL>https://i.ebayimg.com/gallery.jpg</GalleryURL>
    <PictureURL>https://i.ebayimg.com/1.jpg</PictureURL>
    <PictureURL>https://i.ebayimg.com/2.jpg</PictureURL>
    <PrimaryCategoryID>31388</PrimaryCategoryID>
    <PrimaryCategoryName>Cameras &amp; Photo:Digital Cameras</PrimaryCategoryName>
    <BidCount>4</BidCount>
    <ConvertedCurrentPrice currencyID="USD">120.5</ConvertedCurrentPrice>
    <ListingStatus>Active</ListingStatus>
    <TimeLeft>P2DT16H30M0S</TimeLeft>
    <Title>Vintage Camera</Title>
    <Country>US</Country>
    <CurrentPrice currencyID="USD">120.5</CurrentPrice>
    <ConditionID>3000</ConditionID>
    <ConditionDisplayName>Used</ConditionDisplayName>
  </Item>
</GetSingleItemResponse>"#;

pub const SHIPPING_COSTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<GetShippingCostsResponse xmlns="urn:ebay:apis:eBLBaseComponents">
  <Timestamp>2019-08-09T17:30:00.000Z</Timestamp>
  <Ack>Success</Ack>
  <Version>1119</Version>
  <ShippingCostSummary>
    <ShippingServiceName>Standard Shipping</ShippingServiceName>
    <ShippingServiceCost currencyID="USD">0.0</ShippingServiceCost>
    <ShippingType>Flat</ShippingType>
    <ListedShippingServiceCost currencyID="USD">0.0</ListedShippingServiceCost>
  </ShippingCostSummary>
</GetShippingCostsResponse>"#;

/// `findItemsAdvanced` answering page `page` with two items.
pub fn search_result(page: u32) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<findItemsAdvancedResponse xmlns="http://www.ebay.com/marketplace/search/v1/services">
  <ack>Success</ack>
  <version>1.13.0</version>
  <timestamp>2019-08-09T17:30:00.000Z</timestamp>
  <searchResult count="2">
    <item>
      <itemId>254321</itemId>
      <title>Vintage Camera</title>
      <globalId>EBAY-US</globalId>
      <primaryCategory>
        <categoryId>31388</categoryId>
        <categoryName>Digital Cameras</categoryName>
      </primaryCategory>
      <galleryURL>https://i.ebayimg.com/gallery.jpg</galleryURL>
      <viewItemURL>https://www.ebay.com/itm/254321</viewItemURL>
      <location>Seattle,WA,USA</location>
      <country>US</country>
      <shippingInfo>
        <shippingServiceCost currencyId="USD">0.0</shippingServiceCost>
        <shippingType>Flat</shippingType>
        <shipToLocations>Worldwide</shipToLocations>
      </shippingInfo>
      <sellingStatus>
        <currentPrice currencyId="USD">120.5</currentPrice>
        <convertedCurrentPrice currencyId="USD">120.5</convertedCurrentPrice>
        <bidCount>4</bidCount>
        <sellingState>Active</sellingState>
        <timeLeft>P2DT16H30M0S</timeLeft>
      </sellingStatus>
      <listingInfo>
        <bestOfferEnabled>false</bestOfferEnabled>
        <buyItNowAvailable>true</buyItNowAvailable>
        <startTime>2019-08-05T10:00:00.000Z</startTime>
        <endTime>2019-08-12T10:00:00.000Z</endTime>
        <listingType>Auction</listingType>
        <gift>false</gift>
        <watchCount>7</watchCount>
      </listingInfo>
      <condition>
        <conditionId>3000</conditionId>
        <conditionDisplayName>Used</conditionDisplayName>
      </condition>
      <pictureURLLarge>https://i.ebayimg.com/large.jpg</pictureURLLarge>
    </item>
    <item>
      <itemId>254322</itemId>
      <title>Camera Strap</title>
      <primaryCategory>
        <categoryId>15200</categoryId>
        <categoryName>Straps</categoryName>
      </primaryCategory>
      <viewItemURL>https://www.ebay.com/itm/254322</viewItemURL>
      <country>DE</country>
      <shippingInfo>
        <shippingServiceCost currencyId="USD">4.5</shippingServiceCost>
        <shippingType>Flat</shippingType>
      </shippingInfo>
      <sellingStatus>
        <currentPrice currencyId="EUR">9.99</currentPrice>
        <convertedCurrentPrice currencyId="USD">11.2</convertedCurrentPrice>
        <sellingState>Active</sellingState>
        <timeLeft>P20DT1H0M0S</timeLeft>
      </sellingStatus>
      <listingInfo>
        <bestOfferEnabled>true</bestOfferEnabled>
        <buyItNowAvailable>false</buyItNowAvailable>
        <startTime>2019-08-01T10:00:00.000Z</startTime>
        <endTime>2019-08-31T10:00:00.000Z</endTime>
        <listingType>StoreInventory</listingType>
      </listingInfo>
    </item>
  </searchResult>
  <paginationOutput>
    <pageNumber>{page}</pageNumber>
    <entriesPerPage>20</entriesPerPage>
    <totalPages>7</totalPages>
    <totalEntries>132</totalEntries>
  </paginationOutput>
  <itemSearchURL>https://www.ebay.com/sch/i.html?_nkw=camera</itemSearchURL>
  <categoryHistogramContainer>
    <categoryHistogram>
      <categoryId>625</categoryId>
      <categoryName>Cameras &amp; Photo</categoryName>
      <count>120</count>
      <childCategoryHistogram>
        <categoryId>31388</categoryId>
        <categoryName>Digital Cameras</categoryName>
        <count>100</count>
      </childCategoryHistogram>
    </categoryHistogram>
  </categoryHistogramContainer>
  <aspectHistogramContainer>
    <domainDisplayName>Digital Cameras</domainDisplayName>
    <aspect name="Brand">
      <valueHistogram valueName="Canon">
        <count>40</count>
      </valueHistogram>
      <valueHistogram valueName="Nikon">
        <count>35</count>
      </valueHistogram>
    </aspect>
  </aspectHistogramContainer>
</findItemsAdvancedResponse>"#,
        page = page
    )
}

pub const SEARCH_FAILURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<findItemsAdvancedResponse xmlns="http://www.ebay.com/marketplace/search/v1/services">
  <ack>Failure</ack>
  <errorMessage>
    <error>
      <errorId>3</errorId>
      <domain>Security</domain>
      <severity>Error</severity>
      <message>Authentication failed : Invalid Application: test-app</message>
    </error>
  </errorMessage>
  <version>1.13.0</version>
</findItemsAdvancedResponse>"#;

pub const GEOIP: &str = r#"{
  "ip": "8.8.8.8",
  "continent_code": "NA",
  "country_code2": "US",
  "city": "Mountain View",
  "zipcode": "94043",
  "time_zone": {
    "name": "America/Los_Angeles",
    "offset": -8
  }
}"#;
