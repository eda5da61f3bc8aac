/*!
# Graphics Sandbox - Asset Formats

File-format implementations of the graphics sandbox importer traits:

- `GltfSceneSource`: glTF 2.0 scenes (`.gltf` + buffers, or `.glb`) as a `SceneSource`
- `ImageFileDecoder`: PNG/JPEG/TGA/BMP images as an `ImageDecoder`
*/

mod gltf_source;
mod image_decoder;

pub use gltf_source::GltfSceneSource;
pub use image_decoder::ImageFileDecoder;
